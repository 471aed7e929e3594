//! SparkMeter HTTP client implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use sparkmeter_core::{
    sort_latest_first, BalanceHistoryEntry, Envelope, Resolution, SalesAccount,
};

use crate::config::ProviderConfig;
use crate::error::{failure_reason, ProviderError};

/// Header carrying the provider API token.
pub const AUTH_HEADER: &str = "authentication-token";

/// SparkMeter API client.
///
/// Holds only configuration and a pooled transport, so it is cheap to clone and
/// safe to share between tasks.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
}

impl ProviderClient {
    /// Create a new provider client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider API URL (e.g., `"https://example.sparkmeter.cloud/api/v0"`)
    /// * `token` - Provider API token
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configuration`] if the token is not a valid
    /// header value or the transport cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::with_options(base_url, token, ClientOptions::default())
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`ProviderClient::new`].
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::with_options(
            config.api_url.clone(),
            config.api_token.clone(),
            config.client_options(),
        )
    }

    /// Create a new provider client with custom options.
    ///
    /// # Errors
    ///
    /// See [`ProviderClient::new`].
    pub fn with_options(
        base_url: impl Into<String>,
        token: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ProviderError> {
        let mut token = HeaderValue::try_from(token.into())
            .map_err(|e| ProviderError::Configuration(format!("invalid API token: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(AUTH_HEADER), token);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the sales account attached to a meter.
    ///
    /// Returns `None` on any failure; the cause is logged.
    pub async fn fetch_account_by_meter(&self, meter_serial_number: &str) -> Option<SalesAccount> {
        match self.try_fetch_account_by_meter(meter_serial_number).await {
            Ok(account) => account,
            Err(err) => {
                tracing::error!(meter = %meter_serial_number, error = %err, "Failed to fetch sales account");
                None
            }
        }
    }

    /// Look up the sales account attached to a meter, surfacing failures.
    ///
    /// `Ok(None)` means the provider answered without usable data.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ProviderError`] if the request fails or the
    /// provider responds with a non-success status.
    pub async fn try_fetch_account_by_meter(
        &self,
        meter_serial_number: &str,
    ) -> Result<Option<SalesAccount>, ProviderError> {
        let account: Option<SalesAccount> = self
            .get(
                "/sales-accounts",
                &[
                    ("meter_serial_number", meter_serial_number),
                    ("include_reading", "true"),
                ],
            )
            .await?;

        if account.is_some() {
            tracing::info!(meter = %meter_serial_number, "Fetched sales account");
        }
        Ok(account)
    }

    /// Fetch a customer's balance history, most recent first.
    ///
    /// Returns `None` on any failure; the cause is logged.
    pub async fn fetch_balance_history(
        &self,
        customer_id: u64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        resolution: Resolution,
    ) -> Option<Vec<BalanceHistoryEntry>> {
        match self
            .try_fetch_balance_history(customer_id, start_time, end_time, resolution)
            .await
        {
            Ok(history) => history,
            Err(err) => {
                tracing::error!(customer_id, error = %err, "Failed to fetch balance history");
                None
            }
        }
    }

    /// Fetch a customer's balance history, most recent first, surfacing failures.
    ///
    /// The window is forwarded as-is, even if `start_time > end_time`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ProviderError`] if the request fails or the
    /// provider responds with a non-success status.
    pub async fn try_fetch_balance_history(
        &self,
        customer_id: u64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        resolution: Resolution,
    ) -> Result<Option<Vec<BalanceHistoryEntry>>, ProviderError> {
        let path = format!("/customers/{customer_id}/balances/");
        let start = iso_timestamp(start_time);
        let end = iso_timestamp(end_time);

        let history: Option<Vec<BalanceHistoryEntry>> = self
            .get(
                &path,
                &[
                    ("start_time", start.as_str()),
                    ("end_time", end.as_str()),
                    ("resolution", resolution.as_str()),
                ],
            )
            .await?;

        Ok(history.map(|mut entries| {
            sort_latest_first(&mut entries);
            tracing::info!(
                customer_id,
                %resolution,
                entries = entries.len(),
                "Fetched balance history"
            );
            entries
        }))
    }

    /// Most recent daily balance within `[start_time, end_time]`.
    ///
    /// Returns `None` if there is no history or the lookup failed.
    pub async fn get_latest_balance(
        &self,
        customer_id: u64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Option<BalanceHistoryEntry> {
        let history = self
            .fetch_balance_history(customer_id, start_time, end_time, Resolution::Daily)
            .await;
        latest_entry(customer_id, history)
    }

    /// Most recent daily balance within `[start_time, end_time]`, surfacing failures.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ProviderError`] from the history lookup.
    pub async fn try_get_latest_balance(
        &self,
        customer_id: u64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Option<BalanceHistoryEntry>, ProviderError> {
        let history = self
            .try_fetch_balance_history(customer_id, start_time, end_time, Resolution::Daily)
            .await?;
        Ok(latest_entry(customer_id, history))
    }

    /// Issue a GET and unwrap the response envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let response = match self.client.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(err) => {
                let classified = ProviderError::from_transport(&err);
                tracing::error!(url = %url, error = %err, "{classified}");
                return Err(classified);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let classified = ProviderError::from_transport(&err);
                tracing::error!(url = %url, status = status.as_u16(), error = %err, "{classified}");
                return Err(classified);
            }
        };

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                reason = %failure_reason(status, &body),
                "API error"
            );
            return Err(ProviderError::from_status(status, &body));
        }

        Ok(unwrap_envelope(status, &body))
    }
}

/// Extract `data` from a successful response, or `None` if the response does
/// not have the expected shape.
fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Option<T> {
    if status != StatusCode::OK {
        tracing::error!(status = status.as_u16(), body = %body, "Unexpected response structure");
        return None;
    }

    let data = match serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(Envelope::into_success)
    {
        Some(data) => data,
        None => {
            tracing::error!(body = %body, "Unexpected response structure");
            return None;
        }
    };

    match serde_json::from_value(data) {
        Ok(data) => Some(data),
        Err(err) => {
            tracing::error!(body = %body, error = %err, "Unexpected response structure");
            None
        }
    }
}

fn latest_entry(
    customer_id: u64,
    history: Option<Vec<BalanceHistoryEntry>>,
) -> Option<BalanceHistoryEntry> {
    match history.and_then(|entries| entries.into_iter().next()) {
        Some(latest) => {
            tracing::info!(customer_id, timestamp = %latest.timestamp, "Fetched latest balance");
            Some(latest)
        }
        None => {
            tracing::warn!(customer_id, "No balance history found");
            None
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Client options for customization.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Request timeout (default: none, wait indefinitely).
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn client_creation() {
        let client = ProviderClient::new("http://localhost:8080", "test-token").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ProviderClient::new("http://localhost:8080/api/v0/", "test-token").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v0");
    }

    #[test]
    fn empty_configuration_is_accepted() {
        let client = ProviderClient::from_config(&ProviderConfig::default()).unwrap();
        assert_eq!(client.base_url(), "");
    }

    #[test]
    fn invalid_token_is_rejected() {
        let err = ProviderClient::new("http://localhost:8080", "bad\ntoken").unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn client_options() {
        let options = ClientOptions::with_timeout(Duration::from_secs(5));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(ClientOptions::default().timeout, None);
        assert!(ProviderClient::with_options("http://localhost", "t", options).is_ok());
    }

    #[test]
    fn timestamps_are_iso_utc_millis() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap();
        assert_eq!(iso_timestamp(instant), "2024-01-01T06:30:00.000Z");
    }

    #[test]
    fn envelope_requires_success_and_200() {
        let body = r#"{"status":"success","data":[{"timestamp":"2024-01-01","account_balance":5}]}"#;

        let ok: Option<Vec<BalanceHistoryEntry>> = unwrap_envelope(StatusCode::OK, body);
        assert_eq!(ok, Some(vec![BalanceHistoryEntry::new("2024-01-01", 5.0)]));

        let created: Option<Vec<BalanceHistoryEntry>> = unwrap_envelope(StatusCode::CREATED, body);
        assert_eq!(created, None);

        let failed: Option<Vec<BalanceHistoryEntry>> =
            unwrap_envelope(StatusCode::OK, r#"{"status":"failure","data":[]}"#);
        assert_eq!(failed, None);
    }

    #[test]
    fn envelope_rejects_mistyped_data() {
        let account: Option<SalesAccount> =
            unwrap_envelope(StatusCode::OK, r#"{"status":"success","data":{"id":1}}"#);
        assert_eq!(account, None);

        let not_json: Option<SalesAccount> = unwrap_envelope(StatusCode::OK, "<html>");
        assert_eq!(not_json, None);
    }

    #[test]
    fn latest_entry_takes_first() {
        let history = vec![
            BalanceHistoryEntry::new("2024-01-03", 10.0),
            BalanceHistoryEntry::new("2024-01-02", 8.0),
        ];
        assert_eq!(
            latest_entry(1, Some(history)),
            Some(BalanceHistoryEntry::new("2024-01-03", 10.0))
        );
        assert_eq!(latest_entry(1, Some(Vec::new())), None);
        assert_eq!(latest_entry(1, None), None);
    }
}
