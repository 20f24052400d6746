//! Display formatting for feed entries.
//!
//! All three formatters are pure. Elapsed time takes `now` as an argument so the
//! text can be recomputed on every render instead of being frozen at fetch time.

use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Relative age of an entry, e.g. `"3 hours ago"`.
///
/// Anything under a minute old, including timestamps in the future, reads
/// `"just now"`. A missing timestamp yields an empty string.
///
/// ```
/// use chrono::{Duration, Utc};
/// use practice_feed::ui::format::elapsed_text;
///
/// let now = Utc::now();
/// assert_eq!(elapsed_text(Some(now - Duration::minutes(5)), now), "5 minutes ago");
/// assert_eq!(elapsed_text(None, now), "");
/// ```
#[must_use]
pub fn elapsed_text(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return String::new();
    };

    let seconds = (now - created_at).num_seconds();
    if seconds < SECONDS_PER_MINUTE {
        return "just now".to_string();
    }

    let days = seconds / SECONDS_PER_DAY;
    let (count, unit) = if seconds < SECONDS_PER_HOUR {
        (seconds / SECONDS_PER_MINUTE, "minute")
    } else if seconds < SECONDS_PER_DAY {
        (seconds / SECONDS_PER_HOUR, "hour")
    } else if days < DAYS_PER_WEEK {
        (days, "day")
    } else if days < DAYS_PER_MONTH {
        (days / DAYS_PER_WEEK, "week")
    } else if days < DAYS_PER_YEAR {
        (days / DAYS_PER_MONTH, "month")
    } else {
        (days / DAYS_PER_YEAR, "year")
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Clock-style duration: `m:ss` below an hour, `h:mm:ss` from an hour on.
///
/// Returns `None` for an absent, zero, negative or non-finite duration so the
/// caller renders nothing. Fractional seconds are truncated.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> Option<String> {
    let seconds = seconds.filter(|s| s.is_finite() && *s > 0.0)?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.trunc() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    })
}

/// Abbreviated view count: `950`, `1.5K`, `1K`, `2.3M`, `4B`.
///
/// One decimal is kept, truncated rather than rounded, and dropped when it is
/// zero. An absent count reads `"0"`.
#[must_use]
pub fn abbreviate_count(count: Option<u64>) -> String {
    let Some(count) = count else {
        return "0".to_string();
    };

    let (divisor, suffix) = match count {
        0..=999 => return count.to_string(),
        1_000..=999_999 => (1_000, 'K'),
        1_000_000..=999_999_999 => (1_000_000, 'M'),
        _ => (1_000_000_000, 'B'),
    };

    let tenths = count / (divisor / 10);
    let whole = tenths / 10;
    let fraction = tenths % 10;

    if fraction == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{fraction}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(now: DateTime<Utc>, delta: Duration) -> String {
        elapsed_text(Some(now - delta), now)
    }

    #[test]
    fn elapsed_text_units() {
        let now = Utc::now();
        assert_eq!(ago(now, Duration::seconds(59)), "just now");
        assert_eq!(ago(now, Duration::seconds(60)), "1 minute ago");
        assert_eq!(ago(now, Duration::minutes(59)), "59 minutes ago");
        assert_eq!(ago(now, Duration::hours(1)), "1 hour ago");
        assert_eq!(ago(now, Duration::hours(23)), "23 hours ago");
        assert_eq!(ago(now, Duration::days(2)), "2 days ago");
        assert_eq!(ago(now, Duration::days(7)), "1 week ago");
        assert_eq!(ago(now, Duration::days(29)), "4 weeks ago");
        assert_eq!(ago(now, Duration::days(60)), "2 months ago");
        assert_eq!(ago(now, Duration::days(365)), "1 year ago");
        assert_eq!(ago(now, Duration::days(800)), "2 years ago");
    }

    #[test]
    fn future_timestamp_reads_just_now() {
        let now = Utc::now();
        assert_eq!(elapsed_text(Some(now + Duration::hours(3)), now), "just now");
    }

    #[test]
    fn duration_clock_format() {
        assert_eq!(format_duration(Some(125.0)).as_deref(), Some("2:05"));
        assert_eq!(format_duration(Some(59.9)).as_deref(), Some("0:59"));
        assert_eq!(format_duration(Some(3600.0)).as_deref(), Some("1:00:00"));
        assert_eq!(format_duration(Some(3725.0)).as_deref(), Some("1:02:05"));
    }

    #[test]
    fn absent_or_zero_duration_renders_nothing() {
        assert_eq!(format_duration(None), None);
        assert_eq!(format_duration(Some(0.0)), None);
        assert_eq!(format_duration(Some(-4.0)), None);
        assert_eq!(format_duration(Some(f64::NAN)), None);
    }

    #[test]
    fn view_count_abbreviation() {
        assert_eq!(abbreviate_count(None), "0");
        assert_eq!(abbreviate_count(Some(0)), "0");
        assert_eq!(abbreviate_count(Some(999)), "999");
        assert_eq!(abbreviate_count(Some(1000)), "1K");
        assert_eq!(abbreviate_count(Some(1500)), "1.5K");
        assert_eq!(abbreviate_count(Some(1999)), "1.9K");
        assert_eq!(abbreviate_count(Some(999_999)), "999.9K");
        assert_eq!(abbreviate_count(Some(2_300_000)), "2.3M");
        assert_eq!(abbreviate_count(Some(4_000_000_000)), "4B");
    }
}
