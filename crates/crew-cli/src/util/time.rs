//! Human-readable relative timestamps for `status`/`inbox` text output.

use chrono::{DateTime, Utc};

/// Renders a Unix millisecond timestamp as "3m ago", "2h ago", etc.
pub fn format_age_ms(timestamp_ms: u64) -> String {
    let then = DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64).unwrap_or_else(Utc::now);
    format_since(then)
}

/// Renders an RFC 3339 timestamp the same way; falls back to the raw
/// string when it doesn't parse (forward-compatible with unknown formats).
pub fn format_age_iso8601(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(then) => format_since(then.with_timezone(&Utc)),
        Err(_) => timestamp.to_string(),
    }
}

fn format_since(then: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(then);
    let secs = delta.num_seconds();
    if secs < 0 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{secs}s ago");
    }
    if secs < 3600 {
        return format!("{}m ago", secs / 60);
    }
    if secs < 86_400 {
        return format!("{}h ago", secs / 3600);
    }
    format!("{}d ago", secs / 86_400)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_ms_just_now() {
        let now = Utc::now().timestamp_millis() as u64;
        assert_eq!(format_age_ms(now), "0s ago");
    }

    #[test]
    fn test_format_age_iso8601_falls_back_on_garbage() {
        assert_eq!(format_age_iso8601("not-a-timestamp"), "not-a-timestamp");
    }
}
