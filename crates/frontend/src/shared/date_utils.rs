/// Utilities for date and time formatting
///
/// Backend timestamps arrive either as text (RFC 3339, RFC 2822 or a plain
/// `YYYY-MM-DD HH:MM:SS`) or as epoch seconds.
use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Format a timestamp string as `YYYY-MM-DD HH:MM`.
/// Unparseable input is returned unchanged.
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
pub fn format_minutes(raw: &str) -> String {
    match parse_naive(raw.trim()) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Format epoch seconds (UTC) as `YYYY-MM-DD HH:MM:SS`.
pub fn format_epoch_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_minutes("2024-03-15 09:30:00"), "2024-03-15 09:30");
        assert_eq!(format_minutes("Fri, 15 Mar 2024 14:02:26 GMT"), "2024-03-15 14:02");
    }

    #[test]
    fn test_format_epoch_seconds() {
        assert_eq!(format_epoch_seconds(0.0), "1970-01-01 00:00:00");
        assert_eq!(format_epoch_seconds(1710511346.5), "2024-03-15 14:02:26");
        assert_eq!(format_epoch_seconds(f64::NAN), "");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_minutes("next tuesday"), "next tuesday");
        assert_eq!(format_minutes(""), "");
    }
}
