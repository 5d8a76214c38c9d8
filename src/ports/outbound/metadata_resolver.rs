use crate::enrichment::domain::PackageMetadata;
use crate::shared::Result;
use async_trait::async_trait;
use std::fmt;

/// How much the resolver aggregates per package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Downloads, first/last publish time and one repository URL
    #[default]
    Standard,
    /// Standard fields plus the distinct reverse-dependency count
    Full,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Standard => write!(f, "standard"),
            ResolutionMode::Full => write!(f, "full"),
        }
    }
}

/// MetadataResolver port for looking up aggregated package metadata
///
/// Each returned row is already aggregated by the store across the
/// package's versions and repository-typed URLs; callers never
/// re-aggregate.
///
/// # Async Support
/// Implementations must be `Send + Sync` so several names can be resolved
/// concurrently against one shared connection.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolves one package name
    ///
    /// # Returns
    /// Zero or more rows whose name matches `name`. Zero rows means the
    /// store knows nothing about the package, which is not an error.
    ///
    /// # Errors
    /// Returns an error on any connectivity or query failure.
    async fn resolve(&self, name: &str, mode: ResolutionMode) -> Result<Vec<PackageMetadata>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_standard() {
        assert_eq!(ResolutionMode::default(), ResolutionMode::Standard);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ResolutionMode::Standard.to_string(), "standard");
        assert_eq!(ResolutionMode::Full.to_string(), "full");
    }
}
