//! Cached OAuth credentials, keyed by environment.
//!
//! The on-disk format is a single JSON object:
//!
//! ```json
//! {
//!   "sandbox": { "oauth_token": "...", "oauth_token_secret": "..." },
//!   "live":    { "oauth_token": "...", "oauth_token_secret": "..." }
//! }
//! ```
//!
//! Loading never fails: any problem reading the cache just means there is no
//! cached credential and the caller logs in interactively. Saving does fail
//! when the existing file cannot be merged into, since overwriting it would
//! throw away the other environment's credential.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::constants::DEFAULT_TOKEN_FILE;
use crate::error::{EtradeError, Result};
use crate::types::auth::Credential;
use crate::types::enums::Environment;
use crate::types::market::RawMap;

/// Key-value store of access credentials per environment.
pub trait TokenStore {
    /// The cached credential for `environment`, if there is a usable one.
    fn load(&self, environment: Environment) -> Option<Credential>;

    /// Store `credential` under `environment`, keeping other entries.
    fn save(&mut self, environment: Environment, credential: &Credential) -> Result<()>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Token store backed by a JSON file readable only by its owner.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FILE)
    }
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl Into<String>) -> EtradeError {
        EtradeError::TokenStore {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Current file content as a map; a missing file is an empty map.
    fn read_existing(&self) -> Result<RawMap> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RawMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(self.corrupt(format!("expected a JSON object, found {other}"))),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    /// Replace the file in one rename so readers never see a partial write.
    fn write_atomic(&self, tokens: &RawMap) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // NamedTempFile is created 0600 on Unix
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, tokens)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, environment: Environment) -> Option<Credential> {
        let path = self.path.display();

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%path, error = %e, "no cached OAuth credentials");
                return None;
            }
        };
        let tokens: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(%path, error = %e, "cannot parse cached OAuth credentials");
                return None;
            }
        };
        let Some(entry) = tokens.get(environment.key()) else {
            tracing::warn!(%path, %environment, "no cached OAuth credentials for environment");
            return None;
        };
        match serde_json::from_value(entry.clone()) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!(%path, %environment, error = %e, "malformed cached OAuth credentials");
                None
            }
        }
    }

    fn save(&mut self, environment: Environment, credential: &Credential) -> Result<()> {
        let mut tokens = self.read_existing()?;
        tokens.insert(
            environment.key().to_owned(),
            serde_json::to_value(credential)?,
        );
        self.write_atomic(&tokens)?;
        tracing::info!(path = %self.path.display(), %environment, "cached OAuth credentials");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Token store that keeps credentials in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    tokens: HashMap<Environment, Credential>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an entry.
    pub fn with_credential(mut self, environment: Environment, credential: Credential) -> Self {
        self.tokens.insert(environment, credential);
        self
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, environment: Environment) -> Option<Credential> {
        self.tokens.get(&environment).cloned()
    }

    fn save(&mut self, environment: Environment, credential: &Credential) -> Result<()> {
        self.tokens.insert(environment, credential.clone());
        Ok(())
    }
}
