//! Display helpers for durations and server timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats seconds as `m:ss`. Fractions are truncated.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a server timestamp as `DD Mon YYYY`; `-` when absent or unparsable.
pub fn format_date(value: Option<&str>) -> String {
    value
        .and_then(parse_date)
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]`, or a bare date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(599.9), "9:59");
        assert_eq!(format_duration(-3.0), "0:00");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("garbage")), "-");
        assert_eq!(format_date(Some("2026-03-07")), "07 Mar 2026");
        assert_eq!(format_date(Some("2026-03-07T10:15:00")), "07 Mar 2026");
        assert_eq!(
            format_date(Some("2026-03-07T10:15:00.123+05:30")),
            "07 Mar 2026"
        );
    }
}
