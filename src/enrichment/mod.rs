/// Enrichment core - pure domain model and services
///
/// Nothing in this module performs I/O. Records arrive already aggregated
/// from a `MetadataResolver`; this layer only deduplicates, filters and orders.
pub mod domain;
pub mod services;
