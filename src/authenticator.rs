//! Obtaining an access token.
//!
//! Two paths, tried in order:
//!
//! 1. **Cached**: load the credential from the [`TokenStore`] and renew it.
//! 2. **Interactive**: if there is nothing cached or renewal fails, fetch a
//!    request token, have the operator approve it in a browser, exchange the
//!    verification code for an access token and cache it.
//!
//! There is exactly one interactive attempt; its errors go to the caller.

use std::io::{self, BufRead, Write};

use crate::client::EtradeClient;
use crate::constants::OAUTH_BASE_URL;
use crate::error::{EtradeError, Result};
use crate::token_store::TokenStore;
use crate::types::auth::{ConsumerKey, Credential};
use crate::types::enums::Environment;

/// Supplies the verification code shown on the authorization page.
pub trait VerificationCodeProvider {
    fn verification_code(&self, authorize_url: &str) -> Result<String>;
}

/// Prints the authorization URL and reads the code from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinVerifier;

impl VerificationCodeProvider for StdinVerifier {
    fn verification_code(&self, authorize_url: &str) -> Result<String> {
        println!("Visit this URL and copy the five character token");
        println!("{authorize_url}");
        print!("E*TRADE token: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let code = line.trim();
        if code.is_empty() {
            return Err(EtradeError::InvalidArgument(
                "empty verification code".into(),
            ));
        }
        Ok(code.to_owned())
    }
}

/// Which path produced the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    Cached,
    Interactive,
}

/// A usable access credential and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub credential: Credential,
    pub path: AuthPath,
}

/// Drives the cached/interactive login for one environment.
#[derive(Debug, Clone)]
pub struct Authenticator {
    consumer: ConsumerKey,
    environment: Environment,
    api_base_url: String,
    auth_base_url: String,
}

impl Authenticator {
    pub fn new(consumer: ConsumerKey, environment: Environment) -> Self {
        Self {
            consumer,
            environment,
            api_base_url: environment.api_base_url().to_owned(),
            auth_base_url: OAUTH_BASE_URL.to_owned(),
        }
    }

    /// Point the OAuth and API calls at another host (mock servers).
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        auth_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.auth_base_url = auth_base_url.into();
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Produce an access credential, prompting through `verifier` only when
    /// the cached one is missing or cannot be renewed.
    pub async fn authenticate(
        &self,
        store: &mut dyn TokenStore,
        verifier: &dyn VerificationCodeProvider,
    ) -> Result<Authenticated> {
        if let Some(credential) = store.load(self.environment) {
            match self.renew(&credential).await {
                Ok(()) => {
                    tracing::info!(environment = %self.environment, "renewed cached OAuth token");
                    return Ok(Authenticated {
                        credential,
                        path: AuthPath::Cached,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cached OAuth token rejected; logging in again");
                }
            }
        }

        let credential = self.interactive(verifier).await?;
        store.save(self.environment, &credential)?;
        Ok(Authenticated {
            credential,
            path: AuthPath::Interactive,
        })
    }

    async fn renew(&self, credential: &Credential) -> Result<()> {
        let client = EtradeClient::with_base_url(
            self.consumer.clone(),
            credential.clone(),
            self.api_base_url.as_str(),
            self.auth_base_url.as_str(),
        )?;
        client.renew_access_token().await
    }

    async fn interactive(&self, verifier: &dyn VerificationCodeProvider) -> Result<Credential> {
        tracing::info!(environment = %self.environment, "starting interactive OAuth login");

        let request_token =
            EtradeClient::get_request_token(&self.auth_base_url, &self.consumer).await?;
        let authorize_url = EtradeClient::authorize_url(&self.consumer.key, &request_token)?;
        let code = verifier.verification_code(&authorize_url)?;

        EtradeClient::get_access_token(&self.auth_base_url, &self.consumer, &request_token, &code)
            .await
    }
}
