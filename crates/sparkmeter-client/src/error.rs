//! Provider error types and failure classification.

use reqwest::StatusCode;

/// Message for a rejected API token.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed. Please check your API token.";

/// Message for a missing resource.
pub const RESOURCE_NOT_FOUND: &str = "Resource not found.";

/// Message for a request that was sent but never answered.
pub const NO_RESPONSE: &str = "No response received from the server";

/// Message for a request that could not be sent.
pub const NETWORK_OR_UNKNOWN: &str = "Network or unknown error occurred";

/// Errors that can occur when talking to the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the API token (HTTP 401).
    #[error("authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Any other failure: unexpected status, no response, network fault.
    #[error("{message}")]
    Api {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// The client could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Classify a non-success HTTP response.
    ///
    /// `body` is the raw response body; it is only used for statuses without
    /// a fixed message.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Authentication {
                message: AUTHENTICATION_FAILED.to_string(),
            },
            StatusCode::NOT_FOUND => Self::NotFound {
                message: RESOURCE_NOT_FOUND.to_string(),
            },
            _ => Self::Api {
                status: Some(status.as_u16()),
                message: format!(
                    "API error: {} - {}",
                    status.as_u16(),
                    failure_reason(status, body)
                ),
            },
        }
    }

    /// Classify a request that produced no HTTP response.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let message = if err.is_builder() {
            NETWORK_OR_UNKNOWN
        } else if err.is_connect()
            || err.is_timeout()
            || err.is_request()
            || err.is_body()
            || err.is_decode()
        {
            NO_RESPONSE
        } else {
            NETWORK_OR_UNKNOWN
        };

        Self::Api {
            status: None,
            message: message.to_string(),
        }
    }

    /// HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            Self::Api { status, .. } => *status,
            Self::Configuration(_) => None,
        }
    }

    /// Whether the provider rejected the credentials.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Whether the resource was absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Human-readable reason for a failing response: the body, or the canonical
/// reason phrase if the body is blank.
pub(crate) fn failure_reason(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_authentication() {
        let err = ProviderError::from_status(StatusCode::UNAUTHORIZED, "token expired");
        assert_eq!(
            err,
            ProviderError::Authentication {
                message: AUTHENTICATION_FAILED.to_string()
            }
        );
        assert!(err.is_authentication());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn not_found_has_fixed_message() {
        let err = ProviderError::from_status(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: Resource not found.");
    }

    #[test]
    fn other_status_includes_code_and_body() {
        let err = ProviderError::from_status(StatusCode::BAD_GATEWAY, " upstream down \n");
        assert_eq!(
            err,
            ProviderError::Api {
                status: Some(502),
                message: "API error: 502 - upstream down".to_string(),
            }
        );
    }

    #[test]
    fn blank_body_falls_back_to_reason_phrase() {
        let err = ProviderError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "API error: 500 - Internal Server Error");
    }

    #[test]
    fn configuration_has_no_status() {
        let err = ProviderError::Configuration("bad token".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_authentication());
        assert!(!err.is_not_found());
    }
}
