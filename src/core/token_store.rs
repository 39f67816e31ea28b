//! GitHub token persistence
//!
//! The token lives in `<config dir>/token.json` as `{"token": "..."}`,
//! readable only by the owner.
//!
//! ## Environment Variable Override
//!
//! `GITHUB_TOKEN` takes priority over the stored file, which makes CI and
//! one-off runs work without touching the config directory.
//!
//! Priority: env var > token file

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::error::{GhfetchError, Result};

const TOKEN_FILE_NAME: &str = "token.json";

/// Environment variable name
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// On-disk format of the token file
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    // Older installs wrote the token under `github_token`
    #[serde(alias = "github_token")]
    token: Option<String>,
}

/// File-backed token store
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store rooted at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the fixed per-user location
    pub fn default_location() -> Result<Self> {
        Ok(Self::at(Config::config_dir()?.join(TOKEN_FILE_NAME)))
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token
    ///
    /// A missing file is simply "no token". A file that cannot be read or
    /// parsed is treated the same way, with a warning.
    pub fn load(&self) -> Option<SecretString> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read token file");
                return None;
            }
        };

        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) => stored
                .token
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt token file");
                None
            }
        }
    }

    /// Save the token, replacing any previous one
    pub fn save(&self, token: &SecretString) -> Result<()> {
        let stored = StoredToken {
            token: Some(token.expose_secret().to_string()),
        };
        let json = serde_json::to_string(&stored).map_err(|e| self.store_error(e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.store_error(e))?;
        }
        // Owner read/write only, from the moment the file exists
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| self.store_error(e))?;

        // An existing file keeps its old mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.store_error(e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| self.store_error(e))?;

        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Delete the stored token
    ///
    /// Returns whether a file was actually removed.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.store_error(e)),
        }
    }

    fn store_error(&self, err: impl std::fmt::Display) -> GhfetchError {
        GhfetchError::TokenStore {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Resolve the token for this run
///
/// Priority: `GITHUB_TOKEN` > token file
pub fn resolve_token(store: &TokenStore) -> Option<SecretString> {
    if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
        if !token.is_empty() {
            tracing::debug!("using token from {}", GITHUB_TOKEN_ENV);
            return Some(SecretString::from(token));
        }
    }

    store.load()
}

/// Get a masked version of a token for display (shows first 4 and last 4 chars)
pub fn mask_token(token: &SecretString) -> String {
    let exposed = token.expose_secret();
    if exposed.chars().count() <= 8 {
        "*".repeat(exposed.chars().count())
    } else {
        let head: String = exposed.chars().take(4).collect();
        let tail: String = exposed
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}...{}", head, tail)
    }
}
