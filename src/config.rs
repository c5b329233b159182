//! Runtime configuration.
//!
//! Consumer keys come from the process environment (optionally seeded from a
//! `.env` file by the binary); everything else from command-line flags.

use std::path::PathBuf;

use crate::constants::{DEFAULT_TOKEN_FILE, OAUTH_BASE_URL};
use crate::error::{EtradeError, Result};
use crate::types::auth::ConsumerKey;
use crate::types::enums::Environment;

/// Everything needed for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub consumer: ConsumerKey,
    pub token_file: PathBuf,
    pub output_dir: PathBuf,
    /// Market API host, derived from `environment` unless overridden.
    pub api_base_url: String,
    /// Host serving the `/oauth/*` endpoints.
    pub auth_base_url: String,
}

impl Config {
    /// Config for `environment` with default file locations and hosts.
    pub fn new(environment: Environment, consumer: ConsumerKey) -> Self {
        Self {
            environment,
            consumer,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            output_dir: PathBuf::from("."),
            api_base_url: environment.api_base_url().to_owned(),
            auth_base_url: OAUTH_BASE_URL.to_owned(),
        }
    }

    /// Config for `environment` with consumer keys read from the process
    /// environment.
    pub fn from_env(environment: Environment) -> Result<Self> {
        Self::from_lookup(environment, |name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(environment, consumer_key_from(environment, lookup)?))
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Point both the market and OAuth calls at other hosts (mock servers).
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        auth_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.auth_base_url = auth_base_url.into();
        self
    }
}

/// Look up the consumer key pair for `environment` through `lookup`.
///
/// Missing and empty values are both errors naming the variable.
pub fn consumer_key_from<F>(environment: Environment, lookup: F) -> Result<ConsumerKey>
where
    F: Fn(&str) -> Option<String>,
{
    let (key_var, secret_var) = environment.consumer_env_vars();
    let get = |name: &str| {
        lookup(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| EtradeError::InvalidArgument(format!("{name} is not set")))
    };
    Ok(ConsumerKey::new(get(key_var)?, get(secret_var)?))
}
