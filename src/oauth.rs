//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Every E*TRADE request, including the token endpoints themselves, carries
//! an `Authorization: OAuth ...` header signed with the consumer secret and,
//! once one exists, the token secret.
//!
//! # Signing
//!
//! 1. Collect the `oauth_*` protocol parameters and the request's query
//!    parameters, percent-encode keys and values, sort them.
//! 2. Build the signature base string `METHOD&enc(url)&enc(params)`.
//! 3. Sign it with HMAC-SHA1 keyed by `enc(consumer_secret)&enc(token_secret)`
//!    and base64 the digest.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::{Rng, distributions::Alphanumeric};
use sha1::Sha1;

use crate::constants::OAUTH_NONCE_LEN;
use crate::error::{EtradeError, Result};
use crate::types::auth::ConsumerKey;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Percent-encode per RFC 3986: only `A-Z a-z 0-9 - . _ ~` pass through.
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Build the signature base string from already-collected parameters.
///
/// `params` are raw (unencoded) key/value pairs; they are encoded and sorted
/// here.
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&normalized)
    )
}

/// The OAuth parameters for one signed request.
///
/// ```
/// use etrade_chains::oauth::OAuthRequest;
/// use etrade_chains::types::auth::ConsumerKey;
///
/// let consumer = ConsumerKey::new("key", "secret");
/// let header = OAuthRequest::new(&consumer)
///     .token("token", "token-secret")
///     .authorization_header("GET", "https://api.etrade.com/v1/market/quote/IBM.json", &[])
///     .unwrap();
/// assert!(header.starts_with("OAuth realm=\"\""));
/// ```
#[derive(Debug, Clone)]
pub struct OAuthRequest<'a> {
    consumer: &'a ConsumerKey,
    token: Option<&'a str>,
    token_secret: &'a str,
    callback: Option<&'a str>,
    verifier: Option<&'a str>,
}

impl<'a> OAuthRequest<'a> {
    pub fn new(consumer: &'a ConsumerKey) -> Self {
        Self {
            consumer,
            token: None,
            token_secret: "",
            callback: None,
            verifier: None,
        }
    }

    /// Sign on behalf of a request or access token.
    pub fn token(mut self, token: &'a str, secret: &'a str) -> Self {
        self.token = Some(token);
        self.token_secret = secret;
        self
    }

    /// Attach `oauth_callback` (request-token step).
    pub fn callback(mut self, callback: &'a str) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Attach `oauth_verifier` (access-token step).
    pub fn verifier(mut self, verifier: &'a str) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Build the `Authorization` header value with a fresh nonce and the
    /// current time.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let timestamp = Utc::now().timestamp();
        self.authorization_header_at(method, url, query, &nonce(), timestamp)
    }

    /// Build the `Authorization` header value for a fixed nonce and timestamp.
    pub fn authorization_header_at(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let timestamp = timestamp.to_string();
        let oauth_params = self.oauth_params(nonce, &timestamp);

        let mut all: Vec<(&str, &str)> = oauth_params.clone();
        all.extend_from_slice(query);
        let base = signature_base_string(method, url, &all);
        let signature = self.sign(&base)?;

        let mut header = String::from("OAuth realm=\"\"");
        for (k, v) in oauth_params
            .iter()
            .copied()
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
        {
            header.push_str(&format!(",{}=\"{}\"", k, percent_encode(v)));
        }
        Ok(header)
    }

    /// Protocol parameters in key order.
    fn oauth_params<'s>(&'s self, nonce: &'s str, timestamp: &'s str) -> Vec<(&'s str, &'s str)> {
        let mut params = Vec::with_capacity(8);
        if let Some(cb) = self.callback {
            params.push(("oauth_callback", cb));
        }
        params.push(("oauth_consumer_key", self.consumer.key.as_str()));
        params.push(("oauth_nonce", nonce));
        params.push(("oauth_signature_method", SIGNATURE_METHOD));
        params.push(("oauth_timestamp", timestamp));
        if let Some(token) = self.token {
            params.push(("oauth_token", token));
        }
        if let Some(verifier) = self.verifier {
            params.push(("oauth_verifier", verifier));
        }
        params.push(("oauth_version", OAUTH_VERSION));
        params
    }

    fn sign(&self, base: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer.secret),
            percent_encode(self.token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| EtradeError::Signing(format!("invalid key length: {e}")))?;
        mac.update(base.as_bytes());
        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OAUTH_NONCE_LEN)
        .map(char::from)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
