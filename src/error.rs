//! Custom error types for ghfetch
//!
//! User-friendly error messages for all failure scenarios.

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

/// Main error type for the ghfetch application
#[derive(Error, Debug)]
pub enum GhfetchError {
    /// No username was given on the command line
    #[error("No username provided. Usage: ghfetch <username> → see 'ghfetch --help'")]
    MissingUsername,

    /// The requested GitHub user does not exist
    #[error("GitHub user '{0}' was not found → check the spelling of the username")]
    UserNotFound(String),

    /// GitHub refused the request because of rate limiting
    #[error("GitHub API rate limit exceeded{} → run 'ghfetch --config' to use a token", format_reset(.reset_at))]
    RateLimited {
        /// When the current rate limit window resets, if GitHub said so
        reset_at: Option<DateTime<Utc>>,
    },

    /// The token in use was rejected, whether from `GITHUB_TOKEN` or the token file
    #[error("GitHub rejected the token → check GITHUB_TOKEN or run 'ghfetch --reset-token'")]
    Unauthorized,

    /// Transport failure, unexpected status or malformed response
    #[error("Network request failed: {0}")]
    Network(String),

    /// An operation needs a token and none is configured
    #[error("A GitHub token is required for this → run 'ghfetch --config' to set one up")]
    TokenMissing,

    /// The avatar cannot be shown in this terminal
    #[error("Cannot display images: {0}")]
    ImageUnsupported(String),

    /// Token file could not be written or removed
    #[error("Cannot update the token file {path}: {message}")]
    TokenStore {
        /// File that was being written
        path: String,
        /// Underlying failure
        message: String,
    },

    /// Token validation during setup failed
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,
}

impl GhfetchError {
    /// Soft errors degrade the output instead of aborting the run
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            GhfetchError::TokenMissing | GhfetchError::ImageUnsupported(_)
        )
    }
}

fn format_reset(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(
            " (resets at {})",
            at.with_timezone(&Local).format("%H:%M:%S")
        ),
        None => String::new(),
    }
}

impl From<reqwest::Error> for GhfetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GhfetchError::Network(format!("unexpected response from GitHub: {}", err))
        } else {
            GhfetchError::Network(err.to_string())
        }
    }
}

impl From<toml::de::Error> for GhfetchError {
    fn from(err: toml::de::Error) -> Self {
        GhfetchError::Toml(err.to_string())
    }
}

/// Result type alias using GhfetchError
pub type Result<T> = std::result::Result<T, GhfetchError>;
