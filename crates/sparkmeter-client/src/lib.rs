//! SparkMeter provider client.
//!
//! This crate wraps the provider's HTTP API: it looks up sales accounts by meter
//! serial number, fetches balance history over a time window and derives the
//! latest balance from it.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use sparkmeter_client::{ProviderClient, ProviderConfig};
//!
//! # async fn example() -> Result<(), sparkmeter_client::ProviderError> {
//! let client = ProviderClient::from_config(&ProviderConfig::from_env())?;
//!
//! if let Some(account) = client.fetch_account_by_meter("SM-0001").await {
//!     println!("{} has a balance of {}", account.name, account.balance);
//! }
//!
//! let end = Utc::now();
//! if let Some(latest) = client.get_latest_balance(42, end - Duration::days(30), end).await {
//!     println!("latest balance {} at {}", latest.account_balance, latest.timestamp);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The plain operations never fail: every error is logged and turned into
//! `None`. The `try_` variants return the classified [`ProviderError`] instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;

pub use client::{ClientOptions, ProviderClient, AUTH_HEADER};
pub use config::{ProviderConfig, ENV_API_TOKEN, ENV_API_URL, ENV_TIMEOUT_SECONDS};
pub use error::{
    ProviderError, AUTHENTICATION_FAILED, NETWORK_OR_UNKNOWN, NO_RESPONSE, RESOURCE_NOT_FOUND,
};
pub use sparkmeter_core::{
    BalanceHistoryEntry, Envelope, MeterReading, Resolution, SalesAccount,
};
