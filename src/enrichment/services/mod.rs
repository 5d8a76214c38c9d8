/// Domain services operating on collections of package metadata
pub mod metadata_deduplicator;
pub mod metadata_sorter;
pub mod package_filter;

pub use metadata_deduplicator::MetadataDeduplicator;
pub use metadata_sorter::MetadataSorter;
pub use package_filter::PackageFilter;
