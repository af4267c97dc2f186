//! CSV export of subscription pages

use crate::Result;
use chrono::NaiveDate;
use gtw_admin_types::Subscription;
use gtw_admin_types::format::{NOT_AVAILABLE, format_timestamp, or_not_available};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column headers of the export
pub const SUBSCRIPTION_CSV_HEADER: [&str; 5] =
    ["Email", "Status", "Subscribed At", "Unsubscribed At", "Source"];

/// `subscriptions-YYYY-MM-DD.csv`
#[must_use]
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("subscriptions-{}.csv", date.format("%Y-%m-%d"))
}

/// Write `subscriptions` as CSV, header first
pub fn write_subscriptions_csv<W: Write>(writer: W, subscriptions: &[Subscription]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(SUBSCRIPTION_CSV_HEADER)?;
    for subscription in subscriptions {
        let unsubscribed = subscription
            .unsubscribed_at
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |ts| format_timestamp(Some(ts)));
        csv.write_record([
            subscription.email.as_str(),
            if subscription.is_active { "Active" } else { "Inactive" },
            format_timestamp(subscription.subscribed_at.as_ref()).as_str(),
            unsubscribed.as_str(),
            or_not_available(subscription.source.as_deref()),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the export to `path`, replacing any existing file
pub fn export_subscriptions(path: &Path, subscriptions: &[Subscription]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_subscriptions_csv(std::io::BufWriter::new(file), subscriptions)?;
    info!(path = %path.display(), rows = subscriptions.len(), "Exported subscriptions");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(default_export_file_name(date), "subscriptions-2024-03-09.csv");
    }

    #[test]
    fn test_csv_rows() {
        let subscriptions = vec![
            Subscription {
                id: "1".to_string(),
                email: "a@gtw.dev".to_string(),
                is_active: true,
                subscribed_at: Some(Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap()),
                unsubscribed_at: None,
                source: Some("footer".to_string()),
            },
            Subscription {
                id: "2".to_string(),
                email: "b@gtw.dev".to_string(),
                is_active: false,
                subscribed_at: None,
                unsubscribed_at: None,
                source: None,
            },
        ];

        let mut out = Vec::new();
        write_subscriptions_csv(&mut out, &subscriptions).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Email,Status,Subscribed At,Unsubscribed At,Source",
                "a@gtw.dev,Active,\"Jan 5, 2024, 03:04 PM\",N/A,footer",
                "b@gtw.dev,Inactive,N/A,N/A,N/A",
            ]
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        export_subscriptions(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "Email,Status,Subscribed At,Unsubscribed At,Source");
    }
}
