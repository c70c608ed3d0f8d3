use chrono::{DateTime, Utc};
use fleetdash_core::parse_timestamp;

/// Plain number rendering: integers without a fraction, everything else as
/// the shortest float representation.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// One decimal place, with exact halves rounded away from zero.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Token counts as `2.3M` / `1.5K` / `950`.
pub fn format_tokens(tokens: f64) -> String {
    if !tokens.is_finite() || tokens == 0.0 {
        return "0".to_string();
    }
    if tokens >= 1_000_000.0 {
        return format!("{}M", one_decimal(tokens / 1_000_000.0));
    }
    if tokens >= 1_000.0 {
        return format!("{}K", one_decimal(tokens / 1_000.0));
    }
    format_number(tokens)
}

/// Seconds as `3m 5s` / `45s`; zero or unknown is `0 min`.
pub fn format_execution_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0 min".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining_seconds = (seconds % 60.0).floor() as u64;
    if minutes > 0 {
        return format!("{minutes}m {remaining_seconds}s");
    }
    format!("{remaining_seconds}s")
}

pub fn format_time_ago(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(parsed) = timestamp.and_then(parse_timestamp) else {
        return "Unknown".to_string();
    };
    let elapsed_ms = now.signed_duration_since(parsed).num_milliseconds() as f64;
    let hours = (elapsed_ms / 3_600_000.0).round();
    if hours < 1.0 {
        return "Less than an hour ago".to_string();
    }
    if hours < 24.0 {
        return format!("{} hours ago", hours as i64);
    }
    let days = (hours / 24.0).round();
    format!("{} days ago", days as i64)
}

/// Percentage of `total` with one decimal; a non-positive total yields `0.0`.
pub fn format_share(part: f64, total: f64) -> String {
    if !total.is_finite() || total <= 0.0 || !part.is_finite() {
        return "0.0".to_string();
    }
    one_decimal(part / total * 100.0)
}

pub fn truncate_text(text: Option<&str>, max_chars: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{
        format_execution_time, format_number, format_share, format_time_ago, format_tokens,
        truncate_text,
    };

    #[test]
    fn tokens_scale_to_thousands_and_millions() {
        assert_eq!(format_tokens(0.0), "0");
        assert_eq!(format_tokens(f64::NAN), "0");
        assert_eq!(format_tokens(950.0), "950");
        assert_eq!(format_tokens(1_000.0), "1.0K");
        assert_eq!(format_tokens(1_500.0), "1.5K");
        assert_eq!(format_tokens(999_000.0), "999.0K");
        assert_eq!(format_tokens(1_500_000.0), "1.5M");
        assert_eq!(format_tokens(2_300_000.0), "2.3M");
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(format_tokens(1_250.0), "1.3K");
        assert_eq!(format_tokens(3_250_000.0), "3.3M");
        assert_eq!(format_share(1.0, 16.0), "6.3");
        assert_eq!(format_share(1.0, 8.0), "12.5");
    }

    #[test]
    fn execution_time_splits_minutes_and_seconds() {
        assert_eq!(format_execution_time(95.0), "1m 35s");
        assert_eq!(format_execution_time(45.0), "45s");
        assert_eq!(format_execution_time(185.0), "3m 5s");
        assert_eq!(format_execution_time(60.9), "1m 0s");
        assert_eq!(format_execution_time(0.0), "0 min");
        assert_eq!(format_execution_time(f64::INFINITY), "0 min");
    }

    #[test]
    fn time_ago_buckets_by_rounded_hours() {
        let now = Utc.with_ymd_and_hms(2024, 8, 21, 12, 0, 0).unwrap();
        let at = |offset: Duration| (now - offset).to_rfc3339();

        assert_eq!(
            format_time_ago(Some(&at(Duration::minutes(20))), now),
            "Less than an hour ago"
        );
        assert_eq!(format_time_ago(Some(&at(Duration::minutes(40))), now), "1 hours ago");
        assert_eq!(format_time_ago(Some(&at(Duration::hours(5))), now), "5 hours ago");
        assert_eq!(format_time_ago(Some(&at(Duration::hours(60))), now), "3 days ago");
        assert_eq!(
            format_time_ago(Some(&at(Duration::hours(-3))), now),
            "Less than an hour ago"
        );
        assert_eq!(format_time_ago(Some("garbage"), now), "Unknown");
        assert_eq!(format_time_ago(None, now), "Unknown");
    }

    #[test]
    fn shares_guard_against_empty_totals() {
        assert_eq!(format_share(1.0, 3.0), "33.3");
        assert_eq!(format_share(5.0, 0.0), "0.0");
        assert_eq!(format_share(0.0, 10.0), "0.0");
        assert_eq!(format_share(2.0, -1.0), "0.0");
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(format_number(26.0), "26");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn truncate_text_appends_ellipsis() {
        assert_eq!(truncate_text(Some("short"), 10), "short");
        assert_eq!(truncate_text(Some("abcdefghij"), 4), "abcd...");
        assert_eq!(truncate_text(None, 4), "");
    }
}
