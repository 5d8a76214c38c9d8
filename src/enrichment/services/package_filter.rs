use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - drops inventory names matching exclusion patterns
///
/// `*` matches zero or more characters. Matching is case-sensitive and
/// happens on raw inventory names, before any resolver call is made.
#[derive(Debug)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// Compiles raw patterns such as `"pytest-*"` or `"@types/*"`
    ///
    /// # Errors
    /// - more than `MAX_EXCLUDE_PATTERNS` patterns
    /// - an empty, oversized or wildcard-only pattern
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Keeps the names that match no pattern, preserving order
    pub fn filter_names(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| !self.matches(name))
            .collect()
    }

    fn matches(&self, package_name: &str) -> bool {
        // Evaluate every pattern so each one records whether it was used.
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(package_name) || hit)
    }

    /// Patterns that matched nothing during filtering
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = compile_pattern(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, package_name: &str) -> bool {
        let is_match = self.matcher.matches(package_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "name"
    Exact(String),
    /// "*suffix"
    EndsWith(String),
    /// "prefix*"
    StartsWith(String),
    /// Any other wildcard layout, split on `*`
    Segments {
        anchored_start: bool,
        anchored_end: bool,
        parts: Vec<String>,
    },
}

impl PatternMatcher {
    fn matches(&self, package_name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => package_name == s,
            PatternMatcher::EndsWith(suffix) => package_name.ends_with(suffix.as_str()),
            PatternMatcher::StartsWith(prefix) => package_name.starts_with(prefix.as_str()),
            PatternMatcher::Segments {
                anchored_start,
                anchored_end,
                parts,
            } => {
                let mut rest = package_name;
                for (idx, part) in parts.iter().enumerate() {
                    if idx == 0 && *anchored_start {
                        match rest.strip_prefix(part.as_str()) {
                            Some(remaining) => rest = remaining,
                            None => return false,
                        }
                        continue;
                    }
                    match rest.find(part.as_str()) {
                        Some(pos) => rest = &rest[pos + part.len()..],
                        None => return false,
                    }
                }

                match (anchored_end, parts.last()) {
                    (true, Some(last)) => package_name.ends_with(last.as_str()),
                    _ => true,
                }
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'",
            ch.escape_debug(),
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();

    if wildcard_count == 0 {
        return PatternMatcher::Exact(pattern.to_string());
    }

    if wildcard_count == 1 {
        if let Some(suffix) = pattern.strip_prefix('*') {
            return PatternMatcher::EndsWith(suffix.to_string());
        }
        if let Some(prefix) = pattern.strip_suffix('*') {
            return PatternMatcher::StartsWith(prefix.to_string());
        }
    }

    PatternMatcher::Segments {
        anchored_start: !pattern.starts_with('*'),
        anchored_end: !pattern.ends_with('*'),
        parts: pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
