use crate::enrichment::domain::{PackageMetadata, SortKey};

/// EnrichmentResponse - result of one enrichment run
///
/// `packages` is deduplicated and already sorted by `sort_key`; formatters
/// render it as-is.
#[derive(Debug, Clone)]
pub struct EnrichmentResponse {
    /// Deduplicated, sorted metadata records
    pub packages: Vec<PackageMetadata>,
    /// Sort key that produced the ordering of `packages`
    pub sort_key: SortKey,
    /// Number of names the inventory source produced, repeats included
    pub inventory_count: usize,
    /// Distinct names for which the resolver returned no rows
    pub unresolved: Vec<String>,
}

impl EnrichmentResponse {
    pub fn new(
        packages: Vec<PackageMetadata>,
        sort_key: SortKey,
        inventory_count: usize,
        unresolved: Vec<String>,
    ) -> Self {
        Self {
            packages,
            sort_key,
            inventory_count,
            unresolved,
        }
    }
}
