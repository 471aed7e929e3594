//! The `{status, data}` wrapper every provider response uses.

use serde::{Deserialize, Serialize};

/// Envelope status that marks `data` as valid.
pub const SUCCESS_STATUS: &str = "success";

/// Provider response envelope.
///
/// Unwrapped immediately at the transport boundary and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Provider status; only `"success"` carries usable data.
    pub status: String,
    /// Payload. Missing payloads deserialize to `T::default()`.
    #[serde(default)]
    pub data: T,
}

impl<T> Envelope<T> {
    /// Whether the provider reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Return the payload if the provider reported success.
    #[must_use]
    pub fn into_success(self) -> Option<T> {
        if self.is_success() {
            Some(self.data)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"success","data":[1,2]}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.into_success(), Some(vec![1, 2]));
    }

    #[test]
    fn error_envelope_without_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"error","message":"bad meter"}"#).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.data.is_null());
        assert_eq!(envelope.into_success(), None);
    }

    #[test]
    fn status_match_is_exact() {
        let envelope = Envelope {
            status: "Success".to_string(),
            data: (),
        };
        assert!(!envelope.is_success());
    }
}
