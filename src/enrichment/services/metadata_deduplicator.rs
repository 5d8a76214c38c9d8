use crate::enrichment::domain::PackageMetadata;
use std::collections::HashSet;

/// MetadataDeduplicator - collapses resolver output to one record per name
///
/// Policy is first-seen-wins: the earliest record for a name is kept and
/// every later record with that name is dropped, whatever its other fields
/// say. Relative order of the kept records is the order of first appearance.
pub struct MetadataDeduplicator;

impl MetadataDeduplicator {
    pub fn dedupe(records: Vec<PackageMetadata>) -> Vec<PackageMetadata> {
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
        let mut deduped = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.name().to_string()) {
                deduped.push(record);
            }
        }

        deduped
    }
}
