use crate::enrichment::domain::PackageMetadata;
use crate::shared::Result;

/// MetadataFormatter port for rendering the final report
///
/// Implementations receive the collection already deduplicated and sorted
/// and must emit records in exactly that order.
pub trait MetadataFormatter {
    /// Renders the packages into the formatter's encoding
    ///
    /// # Errors
    /// Returns an error if serialization fails. Individual malformed cell
    /// values are not errors; they render as a placeholder.
    fn format(&self, packages: &[PackageMetadata]) -> Result<String>;
}
