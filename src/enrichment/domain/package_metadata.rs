use crate::shared::Result;
use chrono::{DateTime, Utc};

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// NewType wrapper for package name with validation
///
/// Names come from several ecosystems (`@scope/pkg`, `serde_json`,
/// `zope.interface`), so only empty, oversized, whitespace and control
/// characters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!(
                "Package name '{}' contains whitespace or control characters",
                name.escape_debug()
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregated provenance and popularity facts for one package.
///
/// Built once per resolver row and never mutated afterwards. Download and
/// dependent counts are summed across every known version by the store;
/// the repository URL is the lexicographically smallest repository-typed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    name: PackageName,
    downloads: u64,
    dependents: Option<u64>,
    repository_url: String,
    first_published: Option<DateTime<Utc>>,
    last_published: Option<DateTime<Utc>>,
}

impl PackageMetadata {
    /// Creates a record, rejecting an empty name or a first publish time
    /// later than the last one.
    pub fn new(
        name: String,
        downloads: u64,
        repository_url: String,
        first_published: Option<DateTime<Utc>>,
        last_published: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let name = PackageName::new(name)?;

        if let (Some(first), Some(last)) = (first_published, last_published) {
            if first > last {
                anyhow::bail!(
                    "Package '{}' has first publish time {} after last publish time {}",
                    name,
                    first.to_rfc3339(),
                    last.to_rfc3339()
                );
            }
        }

        Ok(Self {
            name,
            downloads,
            dependents: None,
            repository_url,
            first_published,
            last_published,
        })
    }

    /// Attaches the distinct reverse-dependency count (full resolution mode)
    pub fn with_dependents(mut self, dependents: u64) -> Self {
        self.dependents = Some(dependents);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn downloads(&self) -> u64 {
        self.downloads
    }

    pub fn dependents(&self) -> Option<u64> {
        self.dependents
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn first_published(&self) -> Option<DateTime<Utc>> {
        self.first_published
    }

    pub fn last_published(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }
}
