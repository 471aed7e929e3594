//! Core types for the SparkMeter provider client.
//!
//! This crate holds the wire types returned by the provider, with no I/O:
//!
//! - **Accounts**: `SalesAccount`, `MeterReading`
//! - **Balances**: `BalanceHistoryEntry`, `sort_latest_first`
//! - **Resolution**: `Resolution` (sampling granularity of balance history)
//! - **Envelope**: `Envelope<T>`, the `{status, data}` wrapper of every response
//!
//! # Timestamps
//!
//! The provider sends timestamps as ISO-8601 strings. They are kept verbatim on
//! the wire types and only parsed (see [`parse_timestamp`]) when ordering history.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod balance;
pub mod envelope;
pub mod error;
pub mod resolution;

pub use account::{MeterReading, SalesAccount};
pub use balance::{parse_timestamp, sort_latest_first, BalanceHistoryEntry};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use error::ResolutionParseError;
pub use resolution::Resolution;
