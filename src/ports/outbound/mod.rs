/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, database, console, etc.).
pub mod formatter;
pub mod inventory_source;
pub mod metadata_resolver;
pub mod output_presenter;
pub mod progress_reporter;

pub use formatter::MetadataFormatter;
pub use inventory_source::InventorySource;
pub use metadata_resolver::{MetadataResolver, ResolutionMode};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
