pub mod package_metadata;
pub mod sort_key;

pub use package_metadata::{PackageMetadata, PackageName};
pub use sort_key::{SortDirection, SortField, SortKey};
