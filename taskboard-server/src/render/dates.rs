//! Localized date and timestamp formatting.
//!
//! Source documents carry ISO-8601 text or epoch milliseconds. Timestamps
//! with an offset, epoch values and date-only values (read as UTC midnight)
//! are converted into the display zone; naive date-times are shown as
//! written.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts accepted besides RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Zone that dates are displayed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The server's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl DisplayZone {
    fn localize(self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&chrono::Local).naive_local(),
            Self::Utc => instant.naive_utc(),
        }
    }

    /// Formats `raw` as a date (`1/15/2026`).
    ///
    /// Returns `None` if `raw` is not a recognizable timestamp.
    #[must_use]
    pub fn format_date(self, raw: &str) -> Option<String> {
        self.parse(raw)
            .map(|dt| dt.format("%-m/%-d/%Y").to_string())
    }

    /// Formats `raw` as a date and time (`1/15/2026, 9:30:00 AM`).
    ///
    /// Returns `None` if `raw` is not a recognizable timestamp.
    #[must_use]
    pub fn format_timestamp(self, raw: &str) -> Option<String> {
        self.parse(raw)
            .map(|dt| dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
    }

    fn parse(self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let millis = raw.parse::<i64>().ok()?;
            return DateTime::from_timestamp_millis(millis).map(|dt| self.localize(dt));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.localize(dt.with_timezone(&Utc)));
        }
        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        {
            return Some(naive);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|midnight| self.localize(midnight.and_utc()))
    }
}
