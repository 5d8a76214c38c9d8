use crate::application::dto::{EnrichmentRequest, EnrichmentResponse};
use crate::enrichment::domain::PackageMetadata;
use crate::enrichment::services::{MetadataDeduplicator, MetadataSorter, PackageFilter};
use crate::ports::outbound::{InventorySource, MetadataResolver, ProgressReporter};
use crate::shared::error::SbomMetaError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;

/// Resolver rows in enumeration order, plus the names that yielded nothing
type ResolvedRows = (Vec<PackageMetadata>, Vec<String>);

/// EnrichInventoryUseCase - core use case for the enrichment pipeline
///
/// Scan → filter → resolve per name → deduplicate → sort. Every failure
/// except an empty resolver result aborts the run; no partial response is
/// ever returned.
///
/// # Type Parameters
/// * `IS` - InventorySource implementation
/// * `MR` - MetadataResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct EnrichInventoryUseCase<IS, MR, PR> {
    inventory_source: IS,
    metadata_resolver: MR,
    progress_reporter: PR,
}

impl<IS, MR, PR> EnrichInventoryUseCase<IS, MR, PR>
where
    IS: InventorySource,
    MR: MetadataResolver,
    PR: ProgressReporter,
{
    /// Creates a new EnrichInventoryUseCase with injected dependencies
    pub fn new(inventory_source: IS, metadata_resolver: MR, progress_reporter: PR) -> Self {
        Self {
            inventory_source,
            metadata_resolver,
            progress_reporter,
        }
    }

    /// Executes the enrichment pipeline
    pub async fn execute(&self, request: EnrichmentRequest) -> Result<EnrichmentResponse> {
        // Step 1: Enumerate the inventory
        let names = self.scan_inventory(&request)?;
        let inventory_count = names.len();

        // Step 2: Apply exclusion filters
        let names = self.apply_exclusion_filters(names, &request)?;

        // Step 3: Resolve each distinct name, in enumeration order
        let distinct = distinct_in_order(names);
        let (rows, unresolved) = self.resolve_all(&distinct, &request).await?;

        // Step 4: First-seen-wins deduplication
        let mut packages = MetadataDeduplicator::dedupe(rows);

        // Step 5: Order the report
        MetadataSorter::sort(&mut packages, request.sort_key);

        self.progress_reporter.report_completion(&format!(
            "✅ Metadata retrieval complete: {} package(s) enriched, {} not found",
            packages.len(),
            unresolved.len()
        ));

        Ok(EnrichmentResponse::new(
            packages,
            request.sort_key,
            inventory_count,
            unresolved,
        ))
    }

    fn scan_inventory(&self, request: &EnrichmentRequest) -> Result<Vec<String>> {
        self.progress_reporter.report(&format!(
            "📖 Scanning package inventory from: {}",
            request.source_path.display()
        ));

        let names = self.inventory_source.scan(&request.source_path)?;

        self.progress_reporter
            .report(&format!("✅ Detected {} package(s)", names.len()));

        Ok(names)
    }

    /// Drops excluded names; bails when the patterns remove everything
    fn apply_exclusion_filters(
        &self,
        names: Vec<String>,
        request: &EnrichmentRequest,
    ) -> Result<Vec<String>> {
        if request.exclude_patterns.is_empty() {
            return Ok(names);
        }

        let filter = PackageFilter::new(request.exclude_patterns.clone())?;
        let original_count = names.len();
        let kept = filter.filter_names(names);

        let excluded_count = original_count - kept.len();
        if excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} package(s) based on filters",
                excluded_count
            ));
        }

        if kept.is_empty() && original_count > 0 {
            anyhow::bail!(
                "All {} package(s) were excluded by the provided filters. \
                 The report would be empty. Please adjust your exclusion patterns.",
                original_count
            );
        }

        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any packages.",
                pattern
            ));
        }

        Ok(kept)
    }

    /// Resolves names with at most `request.concurrency` calls in flight.
    ///
    /// `buffered` yields results in input order regardless of completion
    /// order, so the concatenated rows follow enumeration order and
    /// first-seen-wins stays deterministic.
    async fn resolve_all(
        &self,
        names: &[String],
        request: &EnrichmentRequest,
    ) -> Result<ResolvedRows> {
        let total = names.len();
        let mode = request.mode;

        self.progress_reporter.report(&format!(
            "🔍 Resolving metadata for {} package(s) ({} mode)...",
            total, mode
        ));

        let resolver = &self.metadata_resolver;
        let mut results = stream::iter(names)
            .map(move |name| async move {
                let rows = resolver.resolve(name, mode).await.map_err(|e| {
                    anyhow::Error::from(SbomMetaError::ResolverError {
                        package_name: name.clone(),
                        details: format!("{:#}", e),
                    })
                })?;
                Ok::<_, anyhow::Error>((name, rows))
            })
            .buffered(request.concurrency);

        let mut collected = Vec::new();
        let mut unresolved = Vec::new();
        let mut done = 0;

        while let Some(result) = results.next().await {
            let (name, rows) = result?;
            if rows.is_empty() {
                unresolved.push(name.clone());
            }
            collected.extend(rows);

            done += 1;
            self.progress_reporter
                .report_progress(done, total, Some(name.as_str()));
        }

        Ok((collected, unresolved))
    }
}

/// Removes repeated names, keeping the first occurrence of each
fn distinct_in_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
