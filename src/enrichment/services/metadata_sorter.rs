use crate::enrichment::domain::{PackageMetadata, SortDirection, SortField, SortKey};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// MetadataSorter - orders a deduplicated collection by a `SortKey`
///
/// The sort is stable, so ties keep their first-appearance order.
pub struct MetadataSorter;

impl MetadataSorter {
    pub fn sort(records: &mut [PackageMetadata], key: SortKey) {
        records.sort_by(|a, b| Self::compare(a, b, key));
    }

    /// Returns the ordering of `a` relative to `b` under `key`
    pub fn compare(a: &PackageMetadata, b: &PackageMetadata, key: SortKey) -> Ordering {
        let natural = match key.field {
            SortField::Package => a.name().cmp(b.name()),
            SortField::Repository => a.repository_url().cmp(b.repository_url()),
            SortField::Downloads => a.downloads().cmp(&b.downloads()),
            // Published is inverted: "asc" means newest first.
            SortField::Published => published_instant(b).cmp(&published_instant(a)),
        };

        match key.direction {
            SortDirection::Asc => natural,
            SortDirection::Desc => natural.reverse(),
        }
    }
}

/// Unknown publish times order as the oldest possible instant
fn published_instant(record: &PackageMetadata) -> DateTime<Utc> {
    record.last_published().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, url: &str, downloads: u64, last: Option<DateTime<Utc>>) -> PackageMetadata {
        PackageMetadata::new(name.to_string(), downloads, url.to_string(), None, last).unwrap()
    }

    fn named(name: &str) -> PackageMetadata {
        record(name, "", 0, None)
    }

    fn names(records: &[PackageMetadata]) -> Vec<&str> {
        records.iter().map(|r| r.name()).collect()
    }

    fn ts(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sort_package_asc_and_desc() {
        let mut records = vec![named("zeta"), named("alpha"), named("mid")];

        MetadataSorter::sort(&mut records, SortKey::parse("package,asc"));
        assert_eq!(names(&records), vec!["alpha", "mid", "zeta"]);

        MetadataSorter::sort(&mut records, SortKey::parse("package,desc"));
        assert_eq!(names(&records), vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn test_sort_repository() {
        let mut records = vec![
            record("a", "https://github.com/z/z", 0, None),
            record("b", "https://github.com/a/a", 0, None),
            record("c", "https://gitlab.com/m/m", 0, None),
        ];

        MetadataSorter::sort(&mut records, SortKey::parse("repository,asc"));
        assert_eq!(names(&records), vec!["b", "a", "c"]);

        MetadataSorter::sort(&mut records, SortKey::parse("repository,desc"));
        assert_eq!(names(&records), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_downloads() {
        let mut records = vec![
            record("ten", "", 10, None),
            record("one", "", 1, None),
            record("hundred", "", 100, None),
        ];

        MetadataSorter::sort(&mut records, SortKey::parse("downloads,desc"));
        let downloads: Vec<u64> = records.iter().map(|r| r.downloads()).collect();
        assert_eq!(downloads, vec![100, 10, 1]);

        MetadataSorter::sort(&mut records, SortKey::parse("downloads,asc"));
        let downloads: Vec<u64> = records.iter().map(|r| r.downloads()).collect();
        assert_eq!(downloads, vec![1, 10, 100]);
    }

    #[test]
    fn test_sort_published_direction_is_inverted() {
        let older = record("older", "", 0, Some(ts(2019)));
        let newer = record("newer", "", 0, Some(ts(2024)));

        let mut records = vec![older.clone(), newer.clone()];
        MetadataSorter::sort(&mut records, SortKey::parse("published,asc"));
        assert_eq!(names(&records), vec!["newer", "older"]);

        let mut records = vec![newer, older];
        MetadataSorter::sort(&mut records, SortKey::parse("published,desc"));
        assert_eq!(names(&records), vec!["older", "newer"]);
    }

    #[test]
    fn test_sort_published_unknown_time_is_oldest() {
        let mut records = vec![
            record("unknown", "", 0, None),
            record("known", "", 0, Some(ts(2001))),
        ];

        MetadataSorter::sort(&mut records, SortKey::parse("published,asc"));
        assert_eq!(names(&records), vec!["known", "unknown"]);
    }

    #[test]
    fn test_unknown_field_sorts_like_package_asc() {
        let mut by_banana = vec![named("zeta"), named("alpha"), named("mid")];
        let mut by_package = by_banana.clone();

        MetadataSorter::sort(&mut by_banana, SortKey::parse("banana,asc"));
        MetadataSorter::sort(&mut by_package, SortKey::parse("package,asc"));

        assert_eq!(by_banana, by_package);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut records = vec![
            record("first", "", 5, None),
            record("second", "", 5, None),
            record("third", "", 1, None),
        ];

        MetadataSorter::sort(&mut records, SortKey::parse("downloads,desc"));
        assert_eq!(names(&records), vec!["first", "second", "third"]);
    }
}
