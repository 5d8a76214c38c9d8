/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the lockfile scanner,
/// the Postgres resolver, report formatters and console/file output.
pub mod outbound;
