use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::ScrapeError;

/// A fully read API response.
#[derive(Debug)]
pub struct ApiResponse {
    pub endpoint: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ScrapeError> {
        serde_json::from_slice(&self.body).map_err(|source| ScrapeError::Decode {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

/// Authenticated client for the Discord REST API.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
}

impl DiscordClient {
    /// Build a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        Self::with_base_url(&config.api_base_url, &config.token, config.http_timeout)
    }

    /// Build a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be built.
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(token).map_err(|_| ScrapeError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one GET request and read the whole body.
    ///
    /// Any status code is returned as-is; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] on connection, timeout or body read failures.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ScrapeError> {
        let endpoint = format!("{}{path}", self.base_url);
        trace!(endpoint = %endpoint, ?query, "GET");

        let response = self.client.get(&endpoint).query(query).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse {
            endpoint,
            status,
            headers,
            body,
        })
    }
}
