//! Display helpers shared by tables, detail views and exports

use chrono::{DateTime, Utc};

/// Placeholder shown for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// `Jan 5, 2024, 03:04 PM`, or `N/A` when absent
#[must_use]
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |ts| ts.format("%b %-d, %Y, %I:%M %p").to_string(),
    )
}

/// The value itself, or `N/A` when absent or blank
#[must_use]
pub fn or_not_available(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// `Yes` / `No`, or `N/A` when absent
#[must_use]
pub const fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => NOT_AVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).single();
        assert_eq!(format_timestamp(ts.as_ref()), "Jan 5, 2024, 03:04 PM");
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_or_not_available() {
        assert_eq!(or_not_available(Some("site")), "site");
        assert_eq!(or_not_available(Some("  ")), "N/A");
        assert_eq!(or_not_available(None), "N/A");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(Some(true)), "Yes");
        assert_eq!(yes_no(None), "N/A");
    }
}
