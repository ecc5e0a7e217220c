//! Confluence REST API client.
//!
//! Provides sync HTTP client for Confluence Server/Data Center REST API
//! with HTTP Basic or Bearer token authentication.

mod attachments;
mod labels;
mod pages;

use std::time::Duration;

use mdwiki_config::{ConfigError, ConfluenceConfig, Credentials};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::auth::authorization_header;
use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client for a server with the given credentials.
    pub fn new(base_url: &str, credentials: &Credentials) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: authorization_header(credentials),
        }
    }

    /// Create client from the `[confluence]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the credentials are incomplete
    /// or ambiguous.
    pub fn from_config(config: &ConfluenceConfig) -> Result<Self, ConfigError> {
        let credentials = config.credentials()?;
        Ok(Self::new(&config.base_url, &credentials))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }
}

/// Percent-encode a query parameter value.
fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Read the response body, turning error statuses into
/// [`ConfluenceError::HttpResponse`].
fn read_body(response: Response<Body>) -> Result<String, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_to_string()?)
}

/// Read and decode a JSON response body.
fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ConfluenceError> {
    let body = read_body(response)?;
    Ok(serde_json::from_str(&body)?)
}
