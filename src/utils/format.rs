//! Display formatting for log rows

use std::borrow::Cow;

use chrono::{Local, TimeZone};

use crate::reconcile::parse_timestamp;

/// 缺失值占位符
pub const PLACEHOLDER: &str = "-";

/// `updatedAt` in the local timezone; unparsable input is shown as-is.
pub fn format_local_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

pub fn format_time_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw) {
        Ok(ts) => ts.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) if raw.is_empty() => PLACEHOLDER.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `city, country`, percent-decoded. `-` when the city is unknown.
pub fn format_location(city: Option<&str>, country: Option<&str>) -> String {
    let Some(city) = city.filter(|c| !c.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    let raw = match country.filter(|c| !c.is_empty()) {
        Some(country) => format!("{}, {}", city, country),
        None => city.to_string(),
    };
    percent_decode(&raw).into_owned()
}

/// Malformed escapes leave the input untouched.
pub fn percent_decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Cut to `max` characters, appending `...` when shortened.
pub fn truncate_display(s: &str, max: usize) -> Cow<'_, str> {
    if s.chars().count() <= max {
        return Cow::Borrowed(s);
    }
    let cut: String = s.chars().take(max).collect();
    Cow::Owned(format!("{}...", cut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_time_in_utc() {
        assert_eq!(
            format_time_in("2024-03-01T08:30:00Z", &Utc),
            "2024-03-01 08:30:00"
        );
    }

    #[test]
    fn test_format_time_in_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            format_time_in("2024-03-01T20:00:00Z", &tz),
            "2024-03-02 04:00:00"
        );
    }

    #[test]
    fn test_unparsable_time_is_shown_raw() {
        assert_eq!(format_time_in("yesterday", &Utc), "yesterday");
        assert_eq!(format_time_in("", &Utc), "-");
    }

    #[test]
    fn test_location_decodes_percent_escapes() {
        assert_eq!(
            format_location(Some("S%C3%A3o%20Paulo"), Some("BR")),
            "São Paulo, BR"
        );
        assert_eq!(format_location(Some("Tokyo"), None), "Tokyo");
    }

    #[test]
    fn test_location_placeholder_without_city() {
        assert_eq!(format_location(None, Some("US")), "-");
        assert_eq!(format_location(Some(""), Some("US")), "-");
    }

    #[test]
    fn test_percent_decode_keeps_malformed_input() {
        assert_eq!(percent_decode("100%zz"), "100%zz");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("https://例子.com/路径", 12), "https://例子.c...");
    }
}
