//! HTTP transport to the geocoding provider
//!
//! Performs exactly one HTTP exchange per call and classifies the failure
//! modes of that exchange. Interpreting the payload (what counts as "no
//! match") is left to the resolvers.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;

/// A single GET request to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    url: String,
    query: Vec<(String, String)>,
    user_agent: String,
}

impl ProviderRequest {
    /// Create a request for `url`, identified by `user_agent`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the user agent is blank; providers reject or
    /// throttle unidentified clients.
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>) -> Result<Self, GeocodingError> {
        let user_agent = user_agent.into();
        if user_agent.trim().is_empty() {
            return Err(GeocodingError::Configuration(
                "user agent must not be empty".to_string(),
            ));
        }

        Ok(Self {
            url: url.into(),
            query: Vec::new(),
            user_agent,
        })
    }

    /// Append a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Target URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters in insertion order
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first query parameter named `key`
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Client identification header value
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Carries provider requests over the network
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the decoded JSON payload
    async fn send(&self, request: ProviderRequest) -> Result<Value, GeocodingError>;
}

/// Transport backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport enforcing `timeout_secs` per request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout_secs: u64) -> Result<Self, GeocodingError> {
        if timeout_secs == 0 {
            return Err(GeocodingError::Configuration(
                "timeout must be greater than 0".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GeocodingError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Create a transport from the geocoding configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        Self::new(config.timeout_secs)
    }

    /// Map a `reqwest` failure onto the error taxonomy
    fn classify(&self, err: &reqwest::Error) -> GeocodingError {
        if err.is_timeout() {
            GeocodingError::NetworkTimeout {
                timeout_secs: self.timeout_secs,
            }
        } else if err.is_builder() {
            GeocodingError::Configuration(err.to_string())
        } else if err.is_decode() {
            GeocodingError::ProviderProtocolError(err.to_string())
        } else {
            GeocodingError::NetworkUnavailable(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url()))]
    async fn send(&self, request: ProviderRequest) -> Result<Value, GeocodingError> {
        let response = self
            .client
            .get(request.url())
            .header(USER_AGENT, request.user_agent())
            .query(request.query())
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        debug!(%status, "Geocoding provider responded");

        if !status.is_success() {
            return Err(GeocodingError::ProviderError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(&e))?;

        serde_json::from_slice(&body)
            .map_err(|e| GeocodingError::ProviderProtocolError(format!("invalid JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_keeps_parameter_order() {
        let request = ProviderRequest::new("http://localhost/search", "geolocate-tests")
            .unwrap()
            .param("city", "Scottsbluff")
            .param("format", "jsonv2");

        assert_eq!(request.url(), "http://localhost/search");
        assert_eq!(request.user_agent(), "geolocate-tests");
        assert_eq!(
            request.query(),
            &[
                ("city".to_string(), "Scottsbluff".to_string()),
                ("format".to_string(), "jsonv2".to_string()),
            ]
        );
        assert_eq!(request.query_value("city"), Some("Scottsbluff"));
        assert_eq!(request.query_value("state"), None);
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let result = ProviderRequest::new("http://localhost/search", " ");
        assert!(matches!(result, Err(GeocodingError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(matches!(
            HttpTransport::new(0),
            Err(GeocodingError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_configuration_error() {
        let transport = HttpTransport::new(2).unwrap();
        let request = ProviderRequest::new("not a url/search", "geolocate-tests").unwrap();

        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, GeocodingError::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transport_from_config() {
        let transport = HttpTransport::from_config(&GeocodingConfig::for_testing()).unwrap();
        assert_eq!(transport.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_unavailable() {
        let transport = HttpTransport::new(2).unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let request = ProviderRequest::new("http://127.0.0.1:9/search", "geolocate-tests").unwrap();

        let result = transport.send(request).await;
        assert!(matches!(
            result,
            Err(GeocodingError::NetworkUnavailable(_) | GeocodingError::NetworkTimeout { .. })
        ));
    }
}
