//! Sales account types.

use serde::{Deserialize, Serialize};

/// Power reading snapshot embedded in a sales account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Average power over the reading interval.
    pub average_power: f64,
    /// Peak power over the reading interval.
    pub peak_power: f64,
    /// Minimum power over the reading interval.
    pub min_power: f64,
    /// ISO-8601 timestamp of the reading.
    pub timestamp: String,
}

/// A customer's metering/billing account as reported by the provider.
///
/// Read-only projection of provider state, fetched fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAccount {
    /// Provider account ID.
    pub id: String,
    /// Customer name.
    pub name: String,
    /// Current account balance.
    pub balance: f64,
    /// Latest meter reading.
    pub meter_reading: MeterReading,
}
