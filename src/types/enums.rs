//! Shared enum types that map directly to E*TRADE string values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{LIVE_API_BASE_URL, SANDBOX_API_BASE_URL, env_vars};

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Which E*TRADE deployment to talk to.
///
/// Each environment has its own API host, its own consumer key pair and its
/// own entry in the token store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The test environment at `apisb.etrade.com`.
    Sandbox,
    /// Production.
    #[default]
    Live,
}

impl Environment {
    /// Choose the environment from a `--sandbox` style flag.
    pub fn from_sandbox_flag(use_sandbox: bool) -> Self {
        if use_sandbox { Self::Sandbox } else { Self::Live }
    }

    /// Key used for this environment inside the token store.
    pub fn key(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }

    /// Base URL of the market API for this environment.
    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_BASE_URL,
            Self::Live => LIVE_API_BASE_URL,
        }
    }

    /// Names of the environment variables holding the consumer key and secret.
    pub fn consumer_env_vars(self) -> (&'static str, &'static str) {
        match self {
            Self::Sandbox => (
                env_vars::SANDBOX_CONSUMER_KEY,
                env_vars::SANDBOX_CONSUMER_SECRET,
            ),
            Self::Live => (env_vars::LIVE_CONSUMER_KEY, env_vars::LIVE_CONSUMER_SECRET),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
