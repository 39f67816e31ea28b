//! GitHub API integration module
//!
//! This module provides all GitHub-related functionality:
//! - Profile and starred-count lookups
//! - Pinned repositories and contribution calendar (GraphQL)
//! - Token validation
//! - Error classification

pub mod client;
pub mod contributions;
pub mod error_handler;
pub mod models;
pub mod pinned;
pub mod profile;

pub use client::{ClientConfig, GitHubClient};
pub use contributions::fetch_last_year;
pub use models::{ContributionCalendar, Profile, RepoSummary, TokenInfo};
pub use pinned::fetch_pinned;
pub use profile::ProfileHandler;
