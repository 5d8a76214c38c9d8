/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI, the use case and the formatters,
/// keeping the enrichment domain isolated.
mod enrichment_request;
mod enrichment_response;
mod output_format;

pub use enrichment_request::{EnrichmentRequest, EnrichmentRequestBuilder, MAX_CONCURRENCY};
pub use enrichment_response::EnrichmentResponse;
pub use output_format::OutputFormat;
