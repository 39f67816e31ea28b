//! CLI module for ghfetch
//!
//! This module contains the argument definitions and command handlers.

pub mod commands;
pub mod profile;
pub mod token;

pub use commands::Cli;
pub use profile::ShowOptions;
