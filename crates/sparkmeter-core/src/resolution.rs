//! Sampling granularity for balance history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ResolutionParseError;

/// Time bucketing the provider applies to balance samples.
///
/// The client only forwards the chosen value; aggregation happens server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One sample per hour.
    Hourly,
    /// One sample per day.
    #[default]
    Daily,
    /// One sample per week.
    Weekly,
    /// One sample per month.
    Monthly,
}

impl Resolution {
    /// Query-string value sent to the provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ResolutionParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_daily() {
        assert_eq!(Resolution::default(), Resolution::Daily);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Weekly".parse::<Resolution>(), Ok(Resolution::Weekly));
        assert_eq!(" monthly ".parse::<Resolution>(), Ok(Resolution::Monthly));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "yearly".parse::<Resolution>().unwrap_err();
        assert_eq!(err, ResolutionParseError("yearly".to_string()));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Resolution::Hourly).unwrap();
        assert_eq!(json, "\"hourly\"");
        assert_eq!(Resolution::Hourly.to_string(), "hourly");
    }
}
