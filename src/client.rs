//! Core HTTP client for the E*TRADE REST API.
//!
//! The [`EtradeClient`] struct is the main entry point for the market
//! endpoints. It wraps [`reqwest::Client`], signs every request with OAuth
//! 1.0a and provides a typed `get` helper.
//!
//! API endpoint methods are added to `EtradeClient` via `impl` blocks in the
//! [`crate::api`] module.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::constants::OAUTH_BASE_URL;
use crate::error::{ApiErrorEnvelope, EtradeError, Result};
use crate::oauth::OAuthRequest;
use crate::types::auth::{ConsumerKey, Credential};
use crate::types::enums::Environment;

/// Core HTTP client for the E*TRADE REST API.
///
/// Holds the consumer key and access credential and attaches a freshly
/// signed `Authorization` header to every request.
///
/// # Example
///
/// ```no_run
/// use etrade_chains::client::EtradeClient;
/// use etrade_chains::types::auth::{ConsumerKey, Credential};
/// use etrade_chains::types::enums::Environment;
///
/// # fn main() -> etrade_chains::error::Result<()> {
/// let client = EtradeClient::new(
///     ConsumerKey::new("consumer-key", "consumer-secret"),
///     Credential::new("oauth-token", "oauth-token-secret"),
///     Environment::Sandbox,
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EtradeClient {
    http: reqwest::Client,
    consumer: ConsumerKey,
    credential: Credential,
    /// Base URL for market requests (per environment).
    base_url: String,
    /// Base URL for the `/oauth/*` endpoints.
    auth_base_url: String,
}

impl EtradeClient {
    /// Create a client for the given environment's API host.
    pub fn new(
        consumer: ConsumerKey,
        credential: Credential,
        environment: Environment,
    ) -> Result<Self> {
        Self::with_base_url(
            consumer,
            credential,
            environment.api_base_url(),
            OAUTH_BASE_URL,
        )
    }

    /// Create a client pointing at custom base URLs.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(
        consumer: ConsumerKey,
        credential: Credential,
        base_url: impl Into<String>,
        auth_base_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: Self::build_http()?,
            consumer,
            credential,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            auth_base_url: auth_base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a signed GET request and deserialize the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");

        let resp = self.signed_get(&url, query).await?;
        self.handle_response(resp).await
    }

    /// Perform a signed GET request that only needs a success status.
    pub async fn get_no_content(&self, url: &str) -> Result<()> {
        tracing::debug!(%url, "GET (no content)");

        let resp = self.signed_get(url, &[]).await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(parse_error_body(status, &body))
        }
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from a path segment.
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Build a URL on the OAuth host.
    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}{}", self.auth_base_url, path)
    }

    pub(crate) fn build_http() -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?)
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Sign with the consumer key and access credential, then send.
    async fn signed_get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let auth = OAuthRequest::new(&self.consumer)
            .token(&self.credential.oauth_token, &self.credential.oauth_token_secret)
            .authorization_header("GET", url, query)?;

        Ok(self
            .http
            .get(url)
            .query(query)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?)
    }

    /// Read a response, returning either the deserialized body or an `EtradeError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(EtradeError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            Err(parse_error_body(status, &body))
        }
    }
}

/// Try to parse the API's JSON error structure; fall back to a raw HTTP
/// status error.
pub(crate) fn parse_error_body(status: reqwest::StatusCode, body: &str) -> EtradeError {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        let api_err = envelope.error;
        if api_err.code.is_some() || api_err.message.is_some() {
            return EtradeError::Api(api_err);
        }
    }
    EtradeError::HttpStatus {
        status,
        body: body.to_owned(),
    }
}
