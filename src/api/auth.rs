//! OAuth endpoint implementations.
//!
//! These methods hit the **api.etrade.com/oauth** endpoints regardless of
//! environment. Request and access tokens are fetched before any client
//! exists, so those two are associated functions taking the OAuth base URL
//! explicitly; renewal needs an access token and is a method.

use crate::client::{EtradeClient, parse_error_body};
use crate::constants::{AUTHORIZE_URL, OAUTH_CALLBACK_OOB};
use crate::error::Result;
use crate::oauth::OAuthRequest;
use crate::types::auth::{ConsumerKey, Credential, RequestToken};

impl EtradeClient {
    // -----------------------------------------------------------------------
    // Interactive flow
    // -----------------------------------------------------------------------

    /// **Step 1:** Obtain a short-lived request token.
    ///
    /// **Endpoint:** `GET https://api.etrade.com/oauth/request_token`
    pub async fn get_request_token(
        auth_base_url: &str,
        consumer: &ConsumerKey,
    ) -> Result<RequestToken> {
        let url = format!("{}/oauth/request_token", auth_base_url.trim_end_matches('/'));
        tracing::debug!(%url, "GET request_token");

        let auth = OAuthRequest::new(consumer)
            .callback(OAUTH_CALLBACK_OOB)
            .authorization_header("GET", &url, &[])?;

        let body = Self::token_request(&url, auth).await?;
        Ok(RequestToken(Credential::from_form(&body)?))
    }

    /// **Step 2:** Build the page the operator visits to approve the request
    /// token. The page displays the verification code.
    ///
    /// ```
    /// use etrade_chains::EtradeClient;
    /// use etrade_chains::types::auth::{Credential, RequestToken};
    ///
    /// let rt = RequestToken(Credential::new("abc", "def"));
    /// let url = EtradeClient::authorize_url("my key", &rt).unwrap();
    /// assert_eq!(url, "https://us.etrade.com/e/t/etws/authorize?key=my+key&token=abc");
    /// ```
    pub fn authorize_url(consumer_key: &str, request_token: &RequestToken) -> Result<String> {
        let url = url::Url::parse_with_params(
            AUTHORIZE_URL,
            &[("key", consumer_key), ("token", request_token.token())],
        )?;
        Ok(url.into())
    }

    /// **Step 3:** Exchange the approved request token and its verification
    /// code for an access token.
    ///
    /// **Endpoint:** `GET https://api.etrade.com/oauth/access_token`
    pub async fn get_access_token(
        auth_base_url: &str,
        consumer: &ConsumerKey,
        request_token: &RequestToken,
        verifier: &str,
    ) -> Result<Credential> {
        let url = format!("{}/oauth/access_token", auth_base_url.trim_end_matches('/'));
        tracing::debug!(%url, "GET access_token");

        let auth = OAuthRequest::new(consumer)
            .token(request_token.token(), request_token.secret())
            .verifier(verifier)
            .authorization_header("GET", &url, &[])?;

        let body = Self::token_request(&url, auth).await?;
        Credential::from_form(&body)
    }

    // -----------------------------------------------------------------------
    // Token renewal
    // -----------------------------------------------------------------------

    /// Reactivate the current access token after two hours of inactivity.
    ///
    /// Tokens expire at midnight US Eastern regardless; renewal then fails
    /// and a fresh interactive login is needed.
    ///
    /// **Endpoint:** `GET https://api.etrade.com/oauth/renew_access_token`
    pub async fn renew_access_token(&self) -> Result<()> {
        let url = self.auth_url("/oauth/renew_access_token");
        self.get_no_content(&url).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Send a signed token request and return the raw form-encoded body.
    async fn token_request(url: &str, auth: String) -> Result<String> {
        let http = reqwest::Client::new();
        let resp = http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if status.is_success() {
            Ok(body)
        } else {
            Err(parse_error_body(status, &body))
        }
    }
}
