//! Shared time helpers

use chrono::{SecondsFormat, Utc};

/// Current wall-clock time as a unix timestamp (seconds)
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Current wall-clock time as an ISO-8601 string with millisecond precision
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable countdown, e.g. `4d 23h 59m 10s`
pub fn format_duration(secs: i64) -> String {
    if secs <= 0 {
        return "0s".to_string();
    }
    let d = secs / 86400;
    let h = (secs % 86400) / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    let mut out = Vec::new();
    if d > 0 {
        out.push(format!("{}d", d));
    }
    if h > 0 || d > 0 {
        out.push(format!("{}h", h));
    }
    if m > 0 || h > 0 || d > 0 {
        out.push(format!("{}m", m));
    }
    out.push(format!("{}s", s));
    out.join(" ")
}
