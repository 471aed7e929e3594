//! Error types for sparkmeter-core.

/// Error returned when parsing an unknown [`Resolution`](crate::Resolution).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid resolution: {0} (expected hourly, daily, weekly or monthly)")]
pub struct ResolutionParseError(pub String);
