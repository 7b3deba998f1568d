//! Human-friendly "time ago" strings for todo timestamps.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Round `secs / unit` half-up, never below 2 (singular forms are handled
/// by the thresholds before a plural is produced).
fn plural(secs: i64, unit: i64) -> i64 {
    ((secs + unit / 2) / unit).max(2)
}

fn span(secs: i64) -> String {
    let minutes = (secs + MINUTE / 2) / MINUTE;
    let hours = (secs + HOUR / 2) / HOUR;
    let days = (secs + DAY / 2) / DAY;

    if secs < 45 {
        "a few seconds".to_string()
    } else if secs < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", plural(secs, MINUTE))
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{} hours", plural(secs, HOUR))
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{} days", plural(secs, DAY))
    } else if days < 46 {
        "a month".to_string()
    } else if days < 320 {
        format!("{} months", ((days * 10 + 152) / 304).max(2))
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{} years", plural(secs, 365 * DAY))
    }
}

/// Describe `then` relative to `now`, e.g. `5 minutes ago` or `in a day`.
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs >= 0 {
        format!("{} ago", span(secs))
    } else {
        format!("in {}", span(-secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ago(secs: i64) -> String {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        relative(now - Duration::seconds(secs), now)
    }

    #[test]
    fn seconds_and_minutes() {
        assert_eq!(ago(0), "a few seconds ago");
        assert_eq!(ago(44), "a few seconds ago");
        assert_eq!(ago(45), "a minute ago");
        assert_eq!(ago(89), "a minute ago");
        assert_eq!(ago(90), "2 minutes ago");
        assert_eq!(ago(5 * MINUTE), "5 minutes ago");
        assert_eq!(ago(44 * MINUTE), "44 minutes ago");
    }

    #[test]
    fn hours_and_days() {
        assert_eq!(ago(45 * MINUTE), "an hour ago");
        assert_eq!(ago(89 * MINUTE), "an hour ago");
        assert_eq!(ago(90 * MINUTE), "2 hours ago");
        assert_eq!(ago(3 * HOUR), "3 hours ago");
        assert_eq!(ago(22 * HOUR), "a day ago");
        assert_eq!(ago(36 * HOUR), "2 days ago");
        assert_eq!(ago(10 * DAY), "10 days ago");
    }

    #[test]
    fn months_and_years() {
        assert_eq!(ago(26 * DAY), "a month ago");
        assert_eq!(ago(46 * DAY), "2 months ago");
        assert_eq!(ago(100 * DAY), "3 months ago");
        assert_eq!(ago(320 * DAY), "a year ago");
        assert_eq!(ago(548 * DAY), "2 years ago");
        assert_eq!(ago(5 * 365 * DAY), "5 years ago");
    }

    #[test]
    fn future_timestamps() {
        assert_eq!(ago(-10), "in a few seconds");
        assert_eq!(ago(-3 * HOUR), "in 3 hours");
    }
}
