use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;
use tracing_subscriber::fmt::time::FormatTime;

/// Time format for logging that only includes the time (HH:MM:SS.mmm)
pub struct LocalTimeOnly;

impl FormatTime for LocalTimeOnly {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Parse a service timestamp into local time.
///
/// Accepts RFC 3339 (`2025-03-01T10:15:30+00:00`) and the naive ISO form the
/// service emits for scan start times (`2025-03-01T10:15:30.123456`), which is
/// taken as local time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// `HH:MM:SS` of a service timestamp, or `--:--:--` when absent or unparsable.
pub fn clock_label(s: Option<&str>) -> String {
    match s.and_then(parse_timestamp) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// `YYYY-MM-DD HH:MM:SS` of a service timestamp, or `-`.
pub fn date_label(s: Option<&str>) -> String {
    match s.and_then(parse_timestamp) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Current local date and time in RFC 3339.
pub fn get_sysdate() -> String {
    Local::now().to_rfc3339()
}

/// Current local time as `HH:MM:SS`.
pub fn now_clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_start_time_keeps_wall_clock() {
        assert_eq!(clock_label(Some("2025-03-01T10:15:30.123456")), "10:15:30");
        assert_eq!(date_label(Some("2025-03-01T10:15:30")), "2025-03-01 10:15:30");
    }

    #[test]
    fn missing_or_bad_time_uses_placeholder() {
        assert_eq!(clock_label(None), "--:--:--");
        assert_eq!(clock_label(Some("yesterday")), "--:--:--");
        assert_eq!(date_label(None), "-");
    }

    #[test]
    fn rfc3339_is_accepted() {
        assert!(parse_timestamp("2025-03-01T10:15:30.5+00:00").is_some());
    }
}
