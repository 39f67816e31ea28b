//! CLI argument definitions using clap
//!
//! Defines the flags of the `ghfetch` command.

use clap::Parser;

/// ghfetch - GitHub profile card for your terminal
///
/// Shows a user's GitHub profile next to their avatar, neofetch style.
#[derive(Parser, Debug)]
#[command(name = "ghfetch", version, about, long_about = None)]
pub struct Cli {
    /// GitHub username to show
    pub username: Option<String>,

    /// Set up a GitHub token interactively
    #[arg(long, conflicts_with_all = ["username", "reset_token"])]
    pub config: bool,

    /// Delete the stored token and set up a new one
    #[arg(long, conflicts_with = "username")]
    pub reset_token: bool,

    /// Show the contribution heatmap instead of pinned repositories
    #[arg(long)]
    pub heatmap: bool,

    /// Do not draw the avatar
    #[arg(long)]
    pub no_image: bool,

    /// Render for this many columns instead of the terminal width
    #[arg(long, value_name = "COLUMNS", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// GitHub REST base URL
    #[arg(long, env = "GHFETCH_API_URL", hide = true)]
    pub api_url: Option<String>,
}
