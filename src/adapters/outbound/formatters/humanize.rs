use chrono::{DateTime, Utc};

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// One step of the relative-time ladder: durations below `bound` use
/// `label`, with `{}` replaced by the duration divided by `unit`.
struct Magnitude {
    bound: i64,
    label: &'static str,
    unit: i64,
}

const MAGNITUDES: [Magnitude; 16] = [
    Magnitude { bound: 2 * SECOND, label: "1 second", unit: 0 },
    Magnitude { bound: MINUTE, label: "{} seconds", unit: SECOND },
    Magnitude { bound: 2 * MINUTE, label: "1 minute", unit: 0 },
    Magnitude { bound: HOUR, label: "{} minutes", unit: MINUTE },
    Magnitude { bound: 2 * HOUR, label: "1 hour", unit: 0 },
    Magnitude { bound: DAY, label: "{} hours", unit: HOUR },
    Magnitude { bound: 2 * DAY, label: "1 day", unit: 0 },
    Magnitude { bound: WEEK, label: "{} days", unit: DAY },
    Magnitude { bound: 2 * WEEK, label: "1 week", unit: 0 },
    Magnitude { bound: MONTH, label: "{} weeks", unit: WEEK },
    Magnitude { bound: 2 * MONTH, label: "1 month", unit: 0 },
    Magnitude { bound: YEAR, label: "{} months", unit: MONTH },
    Magnitude { bound: 18 * MONTH, label: "1 year", unit: 0 },
    Magnitude { bound: 2 * YEAR, label: "2 years", unit: 0 },
    Magnitude { bound: LONG_TIME, label: "{} years", unit: YEAR },
    Magnitude { bound: i64::MAX, label: "a long while", unit: 0 },
];

/// Renders `then` relative to `now`: "now", "3 days ago", "1 month from now"
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (seconds, suffix) = if then <= now {
        ((now - then).num_seconds(), "ago")
    } else {
        ((then - now).num_seconds(), "from now")
    };

    if seconds < SECOND {
        return "now".to_string();
    }

    let magnitude = MAGNITUDES
        .iter()
        .find(|m| seconds < m.bound)
        .unwrap_or(&MAGNITUDES[MAGNITUDES.len() - 1]);

    let label = if magnitude.unit == 0 {
        magnitude.label.to_string()
    } else {
        magnitude
            .label
            .replace("{}", &(seconds / magnitude.unit).to_string())
    };

    format!("{} {}", label, suffix)
}

/// Formats a count with comma thousands separators: 1234567 → "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
