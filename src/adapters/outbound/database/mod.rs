/// Database adapters for metadata resolution
mod postgres_resolver;

pub use postgres_resolver::{MetadataRow, PostgresMetadataResolver};
