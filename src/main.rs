//! ghfetch - GitHub profile card for your terminal
//!
//! Shows a GitHub user's profile, pinned repositories or contribution
//! heatmap next to their avatar.
//!
//! Available as the `ghfetch` and `githubfetch` commands.

use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghfetch::cli::commands::Cli;
use ghfetch::cli::{profile, token, ShowOptions};
use ghfetch::core::token_store::resolve_token;
use ghfetch::core::{Config, TokenStore};
use ghfetch::error::{GhfetchError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging; stdout is reserved for the card
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(e: GhfetchError) {
    eprintln!("Error: {}", e);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url.clone());
    let store = TokenStore::default_location()?;
    let interactive = io::stdin().is_terminal();

    if cli.config {
        token::handle_config(&store, &api_url).await?;
        return Ok(());
    }

    if cli.reset_token {
        return token::handle_reset_token(&store, &api_url, interactive).await;
    }

    let username = cli
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(GhfetchError::MissingUsername)?;

    let mut token = resolve_token(&store);
    if token.is_none() && interactive && config.prompt_for_token {
        token = token::offer_setup(&store, &api_url).await?;
    }

    let config = Config { api_url, ..config };
    let options = ShowOptions {
        heatmap: cli.heatmap,
        no_image: cli.no_image,
        width: cli.width,
    };

    profile::handle_profile(username, &config, token, &options).await
}
