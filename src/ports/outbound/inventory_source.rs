use crate::shared::Result;
use std::path::Path;

/// InventorySource port for enumerating the packages present at a location
///
/// This port abstracts whatever derives package identifiers from a project
/// directory, lockfile or image. Only names are needed by the pipeline.
pub trait InventorySource {
    /// Scans `source` and returns package names in discovery order
    ///
    /// Names may repeat; deduplication happens downstream.
    ///
    /// # Errors
    /// Returns an error if the location does not exist, cannot be read,
    /// or contains nothing this source knows how to enumerate.
    fn scan(&self, source: &Path) -> Result<Vec<String>>;
}
