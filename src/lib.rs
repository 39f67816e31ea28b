//! ghfetch - GitHub profile card for the terminal
//!
//! This library fetches a user's public GitHub profile and renders it as a
//! neofetch-style card, optionally beside the user's avatar.

pub mod cli;
pub mod core;
pub mod display;
pub mod error;
pub mod github;
pub mod render;

pub use error::{GhfetchError, Result};
