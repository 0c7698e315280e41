//! HTTP client for the Gude PDU status endpoint.
//!
//! Fetches `/status.json` with the sensor component selector and parses the
//! response into a [`StatusDocument`]. One request per collection pass, no
//! retries.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::CollectorError;
use crate::sensors::SensorTable;
use crate::status::StatusDocument;

/// Component selector that makes the device include sensor descriptors and
/// values in the status document (0x14000, sent in decimal on the wire).
const SENSOR_COMPONENTS: u32 = 0x14000;

/// Client for one Gude PDU.
#[derive(Debug, Clone)]
pub struct GudeClient {
    client: Client,
    host: String,
    ssl: bool,
    username: Option<String>,
    password: Option<String>,
}

impl GudeClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> GudeClientBuilder {
        GudeClientBuilder::default()
    }

    /// The host this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL of the status resource, without the query string.
    pub fn status_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{}://{}/status.json", scheme, self.host)
    }

    /// Fetch and parse the status document.
    pub async fn fetch_status(&self) -> Result<StatusDocument, CollectorError> {
        let url = self.status_url();
        debug!(url = %url, "fetching status document");

        let mut request = self
            .client
            .get(&url)
            .query(&[("components", SENSOR_COMPONENTS)]);

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;
        check_status(response.status())?;

        let document: StatusDocument = response
            .json()
            .await
            .map_err(|e| CollectorError::MalformedDocument(e.to_string()))?;

        Ok(document)
    }

    /// Fetch the status document and flatten it into a sensor table.
    pub async fn collect(&self) -> Result<SensorTable, CollectorError> {
        let document = self.fetch_status().await?;
        SensorTable::from_document(&document)
    }
}

/// Classify a response status: 401 is an auth failure, any other
/// non-success status is a request error carrying the code.
fn check_status(status: reqwest::StatusCode) -> Result<(), CollectorError> {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(CollectorError::Auth("Invalid credentials".to_string()));
    }

    if !status.is_success() {
        return Err(CollectorError::Request {
            status: status.as_u16(),
        });
    }

    Ok(())
}

/// Builder for [`GudeClient`].
#[derive(Debug, Default)]
pub struct GudeClientBuilder {
    host: Option<String>,
    ssl: bool,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl GudeClientBuilder {
    /// Set the device host (IP address or hostname).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Use HTTPS instead of HTTP.
    ///
    /// Certificate validation is disabled in this mode: Gude devices ship
    /// with self-signed certificates, and the original check tool connects
    /// unverified. Known security caveat, kept for compatibility.
    pub fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Set HTTP basic auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> GudeClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(self.ssl)
            .build()
            .expect("Failed to build HTTP client");

        GudeClient {
            client,
            host: self.host.unwrap_or_else(|| "localhost".to_string()),
            ssl: self.ssl,
            username: self.username,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = GudeClient::builder().build();
        assert_eq!(client.host, "localhost");
        assert!(!client.ssl);
        assert!(client.username.is_none());
        assert_eq!(client.status_url(), "http://localhost/status.json");
    }

    #[test]
    fn test_builder_custom() {
        let client = GudeClient::builder()
            .host("10.0.0.5")
            .ssl(true)
            .credentials("admin", "secret")
            .build();

        assert_eq!(client.host(), "10.0.0.5");
        assert_eq!(client.username.as_deref(), Some("admin"));
        assert_eq!(client.password.as_deref(), Some("secret"));
        assert_eq!(client.status_url(), "https://10.0.0.5/status.json");
    }

    #[test]
    fn test_check_status_success() {
        assert!(check_status(reqwest::StatusCode::OK).is_ok());
    }

    #[test]
    fn test_check_status_unauthorized_is_auth() {
        let err = check_status(reqwest::StatusCode::UNAUTHORIZED).unwrap_err();
        assert!(matches!(err, CollectorError::Auth(_)));
    }

    #[test]
    fn test_check_status_non_success_is_request() {
        let err = check_status(reqwest::StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, CollectorError::Request { status: 404 }));

        let err = check_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert!(matches!(err, CollectorError::Request { status: 500 }));
    }

    #[test]
    fn test_component_selector() {
        // The device expects the selector in decimal form on the wire.
        assert_eq!(SENSOR_COMPONENTS, 81920);
    }
}
