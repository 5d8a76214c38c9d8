use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sort key applied when none is given on the command line or in config
pub const DEFAULT_SORT: &str = "published,asc";

/// Column the report is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Lexicographic by package name
    Package,
    /// Lexicographic by repository URL
    Repository,
    /// By last publish time (direction labels are inverted, see `SortKey`)
    Published,
    /// By aggregated download count
    Downloads,
}

impl SortField {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "package" => Some(SortField::Package),
            "repository" => Some(SortField::Repository),
            "published" => Some(SortField::Published),
            "downloads" => Some(SortField::Downloads),
            _ => None,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Package => write!(f, "package"),
            SortField::Repository => write!(f, "repository"),
            SortField::Published => write!(f, "published"),
            SortField::Downloads => write!(f, "downloads"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A `(field, direction)` pair parsed from `FIELD[,DIRECTION]`.
///
/// Parsing never fails: anything unrecognized becomes `package,asc`.
///
/// Known inversion: for `published`, `asc` lists the most recently published
/// package first and `desc` the least recent first. Existing reports and
/// scripts depend on this ordering, so it is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses a sort argument, case-insensitively
    ///
    /// # Examples
    /// ```
    /// use sbom_meta::enrichment::domain::{SortDirection, SortField, SortKey};
    ///
    /// let key = SortKey::parse("Downloads,DESC");
    /// assert_eq!(key, SortKey::new(SortField::Downloads, SortDirection::Desc));
    ///
    /// // Unknown fields fall back to package ascending
    /// assert_eq!(SortKey::parse("banana,asc"), SortKey::default());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let (field_label, direction_label) = match normalized.split_once(',') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (normalized.as_str(), None),
        };

        let Some(field) = SortField::from_label(field_label) else {
            return Self::default();
        };

        match direction_label {
            None | Some("asc") => Self::new(field, SortDirection::Asc),
            Some("desc") => Self::new(field, SortDirection::Desc),
            Some(_) => Self::default(),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::new(SortField::Package, SortDirection::Asc)
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_and_direction() {
        assert_eq!(
            SortKey::parse("repository,desc"),
            SortKey::new(SortField::Repository, SortDirection::Desc)
        );
        assert_eq!(
            SortKey::parse("published,asc"),
            SortKey::new(SortField::Published, SortDirection::Asc)
        );
    }

    #[test]
    fn test_parse_field_only_defaults_to_asc() {
        assert_eq!(
            SortKey::parse("downloads"),
            SortKey::new(SortField::Downloads, SortDirection::Asc)
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            SortKey::parse("PACKAGE,Desc"),
            SortKey::new(SortField::Package, SortDirection::Desc)
        );
    }

    #[test]
    fn test_parse_unknown_field_falls_back() {
        assert_eq!(SortKey::parse("banana,asc"), SortKey::default());
        assert_eq!(SortKey::parse("banana,desc"), SortKey::default());
        assert_eq!(SortKey::parse(""), SortKey::default());
    }

    #[test]
    fn test_parse_unknown_direction_falls_back() {
        assert_eq!(SortKey::parse("downloads,sideways"), SortKey::default());
    }

    #[test]
    fn test_default_sort_constant_parses() {
        assert_eq!(
            SortKey::parse(DEFAULT_SORT),
            SortKey::new(SortField::Published, SortDirection::Asc)
        );
    }

    #[test]
    fn test_from_str_never_fails() {
        let key: SortKey = "whatever".parse().unwrap();
        assert_eq!(key, SortKey::default());
    }

    #[test]
    fn test_display_round_trips_label() {
        let key = SortKey::new(SortField::Downloads, SortDirection::Desc);
        assert_eq!(key.to_string(), "downloads,desc");
    }
}
