// src/stats/format.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MISSING: &str = "—";

/// Parse an exporter timestamp. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`
/// (optionally with fractional seconds, read as UTC) or a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Long-form date such as `October 19, 2026`; unparseable input comes back as is.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Relative age of `ts` against `now`.
pub fn time_ago(ts: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(then) = ts.and_then(parse_timestamp) else {
        return MISSING.to_string();
    };
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{} min ago", s / 60),
        s if s < 86_400 => format!("{} hrs ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{} days ago", s / 86_400),
        _ => then.format("%H:%M UTC").to_string(),
    }
}
