use crate::enrichment::domain::PackageMetadata;
use crate::ports::outbound::MetadataFormatter;
use crate::shared::error::SbomMetaError;
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageEntry<'a> {
    name: &'a str,
    downloads: u64,
    #[serde(skip_serializing_if = "is_zero_or_absent")]
    dependents: Option<u64>,
    url: &'a str,
    #[serde(serialize_with = "rfc3339_or_null")]
    first_published: Option<DateTime<Utc>>,
    #[serde(serialize_with = "rfc3339_or_null")]
    last_published: Option<DateTime<Utc>>,
}

impl<'a> From<&'a PackageMetadata> for PackageEntry<'a> {
    fn from(package: &'a PackageMetadata) -> Self {
        Self {
            name: package.name(),
            downloads: package.downloads(),
            dependents: package.dependents(),
            url: package.repository_url(),
            first_published: package.first_published(),
            last_published: package.last_published(),
        }
    }
}

fn is_zero_or_absent(value: &Option<u64>) -> bool {
    matches!(value, None | Some(0))
}

fn rfc3339_or_null<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => serializer.serialize_none(),
    }
}

/// JsonFormatter adapter for the structured report
///
/// Emits a pretty-printed JSON array, one object per package, in the order
/// given.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataFormatter for JsonFormatter {
    fn format(&self, packages: &[PackageMetadata]) -> Result<String> {
        let entries: Vec<PackageEntry<'_>> = packages.iter().map(PackageEntry::from).collect();

        let mut json =
            serde_json::to_string_pretty(&entries).map_err(|e| SbomMetaError::EncodingError {
                format: "JSON".to_string(),
                details: e.to_string(),
            })?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn package(name: &str, downloads: u64) -> PackageMetadata {
        PackageMetadata::new(
            name.to_string(),
            downloads,
            format!("https://github.com/example/{}", name),
            Some(Utc.with_ymd_and_hms(2019, 3, 1, 8, 30, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
        )
        .unwrap()
    }

    fn parse(output: &str) -> Vec<Value> {
        serde_json::from_str::<Value>(output)
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_format_field_names_and_values() {
        let output = JsonFormatter::new().format(&[package("serde", 1200)]).unwrap();
        let entries = parse(&output);

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry["name"], "serde");
        assert_eq!(entry["downloads"], 1200);
        assert_eq!(entry["url"], "https://github.com/example/serde");
        assert_eq!(entry["firstPublished"], "2019-03-01T08:30:00Z");
        assert_eq!(entry["lastPublished"], "2024-06-15T12:00:00Z");
        assert!(entry.get("dependents").is_none());
    }

    #[test]
    fn test_format_field_order() {
        let output = JsonFormatter::new().format(&[package("serde", 1)]).unwrap();
        let name = output.find("\"name\"").unwrap();
        let downloads = output.find("\"downloads\"").unwrap();
        let url = output.find("\"url\"").unwrap();
        let last = output.find("\"lastPublished\"").unwrap();
        assert!(name < downloads && downloads < url && url < last);
    }

    #[test]
    fn test_format_dependents_present_when_nonzero() {
        let packages = vec![
            package("serde", 1).with_dependents(42),
            package("tiny", 1).with_dependents(0),
        ];
        let entries = parse(&JsonFormatter::new().format(&packages).unwrap());

        assert_eq!(entries[0]["dependents"], 42);
        assert!(entries[1].get("dependents").is_none());
    }

    #[test]
    fn test_format_unknown_timestamps_are_null() {
        let package =
            PackageMetadata::new("ghost".to_string(), 0, String::new(), None, None).unwrap();
        let entries = parse(&JsonFormatter::new().format(&[package]).unwrap());

        assert!(entries[0]["firstPublished"].is_null());
        assert!(entries[0]["lastPublished"].is_null());
    }

    #[test]
    fn test_format_preserves_order() {
        let packages = vec![package("zeta", 1), package("alpha", 2)];
        let entries = parse(&JsonFormatter::new().format(&packages).unwrap());

        let names: Vec<&str> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_format_empty_collection() {
        let output = JsonFormatter::new().format(&[]).unwrap();
        assert_eq!(output.trim(), "[]");
    }
}
