//! Balance history types and ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One sampled balance point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceHistoryEntry {
    /// ISO-8601 timestamp of the sample, as sent by the provider.
    pub timestamp: String,
    /// Account balance at `timestamp`.
    pub account_balance: f64,
}

impl BalanceHistoryEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, account_balance: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            account_balance,
        }
    }

    /// The sample instant, if the timestamp parses.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parse a provider timestamp into a UTC instant.
///
/// Accepts RFC 3339, date-times without an offset and bare dates. The latter
/// two are read as UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort history so that index 0 is the most recent sample.
///
/// Stable: equal instants keep their input order. Entries whose timestamp does
/// not parse go last.
pub fn sort_latest_first(entries: &mut [BalanceHistoryEntry]) {
    entries.sort_by_cached_key(|entry| Reverse(entry.recorded_at()));
}
