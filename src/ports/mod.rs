/// Ports module defining the interfaces between the enrichment core and the outside world
///
/// Only driven (outbound) ports exist: the CLI drives the use case directly.
pub mod outbound;
