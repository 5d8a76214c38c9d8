use crate::enrichment::domain::SortKey;
use crate::ports::outbound::ResolutionMode;
use crate::shared::error::SbomMetaError;
use crate::shared::Result;
use std::path::PathBuf;

/// Upper bound on concurrent resolver calls
pub const MAX_CONCURRENCY: usize = 64;

/// EnrichmentRequest - parameters for one enrichment run
#[derive(Debug, Clone)]
pub struct EnrichmentRequest {
    /// Directory or lockfile to scan for package names
    pub source_path: PathBuf,
    /// Standard or full (with dependents) resolution
    pub mode: ResolutionMode,
    /// Ordering applied to the deduplicated records
    pub sort_key: SortKey,
    /// Patterns for excluding inventory names before resolution
    pub exclude_patterns: Vec<String>,
    /// Maximum number of resolver calls in flight (1 = sequential)
    pub concurrency: usize,
}

impl EnrichmentRequest {
    pub fn builder() -> EnrichmentRequestBuilder {
        EnrichmentRequestBuilder::default()
    }
}

/// Builder for `EnrichmentRequest`
///
/// Defaults: source `.`, standard mode, `package,asc`, no exclusions,
/// sequential resolution.
#[derive(Debug, Default)]
pub struct EnrichmentRequestBuilder {
    source_path: Option<PathBuf>,
    mode: ResolutionMode,
    sort_key: SortKey,
    exclude_patterns: Vec<String>,
    concurrency: Option<usize>,
}

impl EnrichmentRequestBuilder {
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn build(self) -> Result<EnrichmentRequest> {
        let concurrency = self.concurrency.unwrap_or(1);
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            return Err(SbomMetaError::Validation {
                message: format!(
                    "concurrency must be between 1 and {} (got {})",
                    MAX_CONCURRENCY, concurrency
                ),
            }
            .into());
        }

        Ok(EnrichmentRequest {
            source_path: self.source_path.unwrap_or_else(|| PathBuf::from(".")),
            mode: self.mode,
            sort_key: self.sort_key,
            exclude_patterns: self.exclude_patterns,
            concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = EnrichmentRequest::builder().build().unwrap();
        assert_eq!(request.source_path, PathBuf::from("."));
        assert_eq!(request.mode, ResolutionMode::Standard);
        assert_eq!(request.sort_key, SortKey::default());
        assert!(request.exclude_patterns.is_empty());
        assert_eq!(request.concurrency, 1);
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let request = EnrichmentRequest::builder()
            .source_path("/project")
            .mode(ResolutionMode::Full)
            .sort_key(SortKey::parse("downloads,desc"))
            .exclude_patterns(vec!["pytest*".to_string()])
            .concurrency(8)
            .build()
            .unwrap();

        assert_eq!(request.source_path, PathBuf::from("/project"));
        assert_eq!(request.mode, ResolutionMode::Full);
        assert_eq!(request.sort_key, SortKey::parse("downloads,desc"));
        assert_eq!(request.exclude_patterns, vec!["pytest*".to_string()]);
        assert_eq!(request.concurrency, 8);
    }

    #[test]
    fn test_builder_rejects_zero_concurrency() {
        let err = EnrichmentRequest::builder()
            .concurrency(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("concurrency must be between"));
    }

    #[test]
    fn test_builder_rejects_excessive_concurrency() {
        let result = EnrichmentRequest::builder()
            .concurrency(MAX_CONCURRENCY + 1)
            .build();
        assert!(result.is_err());
    }
}
