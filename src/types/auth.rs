//! Authentication types: consumer keys, access credentials, request tokens.

use serde::{Deserialize, Serialize};

use crate::error::{EtradeError, Result};

/// Application identity issued by E*TRADE (one pair per environment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerKey {
    pub key: String,
    pub secret: String,
}

impl ConsumerKey {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// OAuth access token pair authorizing API calls on behalf of the operator.
///
/// This is the record persisted in the token store, keyed by environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

impl Credential {
    pub fn new(oauth_token: impl Into<String>, oauth_token_secret: impl Into<String>) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            oauth_token_secret: oauth_token_secret.into(),
        }
    }

    /// Parse the `application/x-www-form-urlencoded` body returned by the
    /// request-token and access-token endpoints.
    pub fn from_form(body: &str) -> Result<Self> {
        let mut token = None;
        let mut secret = None;
        for (k, v) in url::form_urlencoded::parse(body.trim().as_bytes()) {
            match k.as_ref() {
                "oauth_token" => token = Some(v.into_owned()),
                "oauth_token_secret" => secret = Some(v.into_owned()),
                _ => {}
            }
        }
        match (token, secret) {
            (Some(t), Some(s)) => Ok(Self::new(t, s)),
            _ => Err(EtradeError::invalid_response(format!(
                "token response lacks oauth_token/oauth_token_secret: {body}"
            ))),
        }
    }
}

/// Short-lived token returned by `/oauth/request_token`, valid only for the
/// authorization step. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken(pub Credential);

impl RequestToken {
    pub fn token(&self) -> &str {
        &self.0.oauth_token
    }

    pub fn secret(&self) -> &str {
        &self.0.oauth_token_secret
    }
}
