//! sbom-meta - package inventory enrichment from a CHAI metadata database
//!
//! Scans a project for package names, looks each one up in the CHAI Postgres
//! database and reports downloads, repository URL and publish times as a
//! table or as JSON. The crate follows a hexagonal layout.
//!
//! # Architecture
//!
//! - **Domain Layer** (`enrichment`): metadata records, sort keys, dedup,
//!   sorting and exclusion filtering
//! - **Application Layer** (`application`): the enrichment use case, DTOs
//!   and adapter factories
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): lockfile scanning, Postgres, formatters,
//!   console and file output
//! - **Config** (`config`): environment and YAML configuration
//! - **Shared** (`shared`): error types, exit codes and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use sbom_meta::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let use_case = EnrichInventoryUseCase::new(
//!     LockfileInventorySource::new(),
//!     PostgresMetadataResolver::new(DatabaseConfig::from_env()?),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = EnrichmentRequest::builder().source_path(".").build()?;
//! let response = use_case.execute(request).await?;
//!
//! let output = JsonFormatter::new().format(&response.packages)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod enrichment;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::database::PostgresMetadataResolver;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, LockfileInventorySource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        ColorConfig, JsonFormatter, TableFormatter, TableStyle,
    };
    pub use crate::application::dto::{EnrichmentRequest, EnrichmentResponse, OutputFormat};
    pub use crate::application::use_cases::EnrichInventoryUseCase;
    pub use crate::config::DatabaseConfig;
    pub use crate::enrichment::domain::{
        PackageMetadata, PackageName, SortDirection, SortField, SortKey,
    };
    pub use crate::enrichment::services::{MetadataDeduplicator, MetadataSorter, PackageFilter};
    pub use crate::ports::outbound::{
        InventorySource, MetadataFormatter, MetadataResolver, OutputPresenter, ProgressReporter,
        ResolutionMode,
    };
    pub use crate::shared::Result;
}
