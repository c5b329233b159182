//! Constants for the E*TRADE API.
//!
//! Contains base URLs, the authorization page, and the default file
//! locations used by the token store and the chain writer.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the production E*TRADE REST API.
pub const LIVE_API_BASE_URL: &str = "https://api.etrade.com";

/// Base URL for the E*TRADE sandbox REST API.
pub const SANDBOX_API_BASE_URL: &str = "https://apisb.etrade.com";

/// Base URL for the OAuth token endpoints (shared by both environments).
pub const OAUTH_BASE_URL: &str = "https://api.etrade.com";

/// Page the operator visits to approve a request token.
pub const AUTHORIZE_URL: &str = "https://us.etrade.com/e/t/etws/authorize";

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

/// Callback value for out-of-band (copy/paste) verification.
pub const OAUTH_CALLBACK_OOB: &str = "oob";

/// Length of the random nonce attached to every signed request.
pub const OAUTH_NONCE_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Default location of the cached OAuth credentials.
pub const DEFAULT_TOKEN_FILE: &str = ".etrade_oauth";

/// `strftime` pattern for the timestamp in output file names.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Environment variables holding the consumer key pair for each environment.
pub mod env_vars {
    /// Sandbox consumer key.
    pub const SANDBOX_CONSUMER_KEY: &str = "ETRADE_SANDBOX_CONSUMER_KEY";
    /// Sandbox consumer secret.
    pub const SANDBOX_CONSUMER_SECRET: &str = "ETRADE_SANDBOX_CONSUMER_SECRET";
    /// Live consumer key.
    pub const LIVE_CONSUMER_KEY: &str = "ETRADE_LIVE_CONSUMER_KEY";
    /// Live consumer secret.
    pub const LIVE_CONSUMER_SECRET: &str = "ETRADE_LIVE_CONSUMER_SECRET";
}
