//! Core functionality for ghfetch
//!
//! This module contains shared state that lives on disk:
//! - Application configuration
//! - Token persistence

pub mod config;
pub mod token_store;

pub use config::Config;
pub use token_store::TokenStore;
