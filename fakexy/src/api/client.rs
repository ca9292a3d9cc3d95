//! HTTP client for the fakexy address API.

use std::fmt;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::error::{extract_error_message, ClientError};
use super::types::{ApiStatus, CountryInfo, CountryList};
use crate::config::FakexyConfig;
use crate::record::FetchedAddress;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://fakexy-api-sage.vercel.app";

/// Which address to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRequest {
    /// Any supported country (`GET /api/random`)
    Random,
    /// A specific country code (`GET /api/address?code=<code>`)
    Country(String),
}

impl AddressRequest {
    fn path(&self) -> Result<String, ClientError> {
        match self {
            AddressRequest::Random => Ok("/api/random".to_string()),
            AddressRequest::Country(code) => {
                let code = code.trim();
                if code.is_empty() {
                    return Err(ClientError::InvalidRequest(
                        "country code must not be empty".to_string(),
                    ));
                }
                Ok(format!("/api/address?code={}", urlencoding::encode(code)))
            }
        }
    }
}

impl fmt::Display for AddressRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRequest::Random => write!(f, "random address"),
            AddressRequest::Country(code) => write!(f, "address for {code}"),
        }
    }
}

/// Client for the address API.
///
/// Requests are made one at a time and never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &FakexyConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let config = FakexyConfig {
            base_url: base_url.into(),
            ..FakexyConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path and decode the JSON body.
    ///
    /// The body is decoded before the status is checked: an unparseable body
    /// is a [`ClientError::Decode`] whatever the status, and a parsed body
    /// with a non-success status is a [`ClientError::Api`].
    #[instrument(skip(self))]
    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending request to {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            error!(status = status.as_u16(), "Response body is not JSON: {}", e);
            e
        })?;

        if !status.is_success() {
            let message = extract_error_message(&value);
            error!(status = status.as_u16(), "API request failed: {}", message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(value)
    }

    /// List supported countries, sorted by name.
    pub async fn countries(&self) -> Result<CountryList, ClientError> {
        let body = self.get_json("/api/countries").await?;
        let response = serde_json::from_value::<indexmap::IndexMap<String, CountryInfo>>(body)?;
        let countries = CountryList::from_response(response);
        info!("Loaded {} countries", countries.len());
        Ok(countries)
    }

    /// Generate an address for a random country.
    pub async fn random(&self) -> Result<FetchedAddress, ClientError> {
        self.fetch(&AddressRequest::Random).await
    }

    /// Generate an address for a country code.
    pub async fn address(&self, code: &str) -> Result<FetchedAddress, ClientError> {
        self.fetch(&AddressRequest::Country(code.to_string())).await
    }

    /// Generate an address.
    pub async fn fetch(&self, request: &AddressRequest) -> Result<FetchedAddress, ClientError> {
        let path = request.path()?;
        let body = self.get_json(&path).await?;
        let fetched = FetchedAddress::from_payload(body)?;

        if let Some(suggestion) = &fetched.suggestion {
            info!("Server suggested {} for {}", suggestion, request);
        }
        info!("Fetched {} with {} fields", request, fetched.record.len());
        Ok(fetched)
    }

    /// Probe the API. Failures are reported as [`ApiStatus::Offline`].
    pub async fn status(&self) -> ApiStatus {
        match self.countries().await {
            Ok(countries) => ApiStatus::Online {
                countries: countries.len(),
            },
            Err(e) => {
                warn!("API status check failed: {}", e);
                ApiStatus::Offline {
                    reason: e.to_string(),
                }
            }
        }
    }
}
