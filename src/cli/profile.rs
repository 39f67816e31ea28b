//! Profile card command handler

use std::io::{self, IsTerminal, Write};

use secrecy::SecretString;

use crate::core::config::Config;
use crate::display::{compose_beside, AvatarDisplay, ImageOutcome, ImgcatBackend};
use crate::error::Result;
use crate::github::{fetch_last_year, fetch_pinned, ClientConfig, GitHubClient, ProfileHandler};
use crate::render::{Palette, ProfileCard, Renderer, MIN_BOXED_WIDTH};

/// Width used when the terminal size is unknown
const DEFAULT_WIDTH: usize = 80;

/// Indent of the text-only card
const TEXT_INDENT: &str = "  ";

/// Per-run display switches from the command line
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Contribution heatmap instead of pinned repositories
    pub heatmap: bool,
    /// Never draw the avatar
    pub no_image: bool,
    /// Fixed render width
    pub width: Option<u16>,
}

/// Fetch and print the card for `username`
///
/// Only the profile request is fatal; everything else degrades the card.
pub async fn handle_profile(
    username: &str,
    config: &Config,
    token: Option<SecretString>,
    options: &ShowOptions,
) -> Result<()> {
    let client = GitHubClient::new(ClientConfig::new(&config.api_url, token))?;
    let handler = ProfileHandler::new(&client);

    let profile = handler.fetch_profile(username).await?;
    let starred = soft("starred count", handler.fetch_starred_count(username).await);

    let (pinned, calendar) = if options.heatmap {
        let calendar = soft("contributions", fetch_last_year(&client, username).await);
        (Vec::new(), calendar)
    } else {
        let pinned = soft("pinned repositories", fetch_pinned(&client, username).await);
        (pinned.unwrap_or_default(), None)
    };

    let mut card = ProfileCard::new(&profile, &pinned, client.has_token()).with_starred(starred);
    if options.heatmap {
        card = card.with_heatmap(calendar.as_ref());
    }

    let renderer = Renderer::new(Palette::detect(config.color));
    let width = terminal_width(options.width);
    let mut stdout = io::stdout();

    if wants_image(config, options, width) {
        let display = AvatarDisplay::new(
            &client,
            ImgcatBackend::locate(config.image_command.as_deref()),
        );

        match display.display(&profile.avatar_url, config.image_height).await {
            ImageOutcome::Shown { width_cells } => {
                let column = width_cells.saturating_add(config.text_gap);
                let lines = renderer.render(&card, width.saturating_sub(column as usize));
                write!(stdout, "{}", compose_beside(&lines, config.image_height, column))?;
                stdout.flush()?;
                return Ok(());
            }
            ImageOutcome::Skipped(reason) => {
                tracing::debug!(%reason, "falling back to text only");
            }
        }
    }

    let lines = renderer.render(&card, width.saturating_sub(TEXT_INDENT.len()));
    write!(stdout, "{}", text_only(&lines))?;
    stdout.flush()?;
    Ok(())
}

/// Keep the value of a secondary request, logging why it is missing
fn soft<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_soft() => {
            tracing::debug!(error = %e, "{} skipped", what);
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "{} unavailable", what);
            None
        }
    }
}

/// `--width`, else the terminal's width, else 80 columns
fn terminal_width(requested: Option<u16>) -> usize {
    requested
        .map(usize::from)
        .or_else(|| crossterm::terminal::size().ok().map(|(w, _)| usize::from(w)))
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// The avatar needs a real terminal and room for a boxed card beside it
fn wants_image(config: &Config, options: &ShowOptions, width: usize) -> bool {
    config.show_avatar
        && !options.no_image
        && io::stdout().is_terminal()
        && width >= usize::from(config.text_column()) + MIN_BOXED_WIDTH
}

/// Card without an avatar: indented, with a blank line above and below
fn text_only(lines: &[String]) -> String {
    let mut out = String::from("\n");
    for line in lines {
        out.push_str(TEXT_INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GhfetchError;

    #[test]
    fn test_text_only_layout() {
        let lines = vec!["╭─╮".to_string(), "╰─╯".to_string()];
        assert_eq!(text_only(&lines), "\n  ╭─╮\n  ╰─╯\n\n");
    }

    #[test]
    fn test_requested_width_wins() {
        assert_eq!(terminal_width(Some(60)), 60);
    }

    #[test]
    fn test_no_image_flag() {
        let options = ShowOptions {
            no_image: true,
            ..Default::default()
        };
        assert!(!wants_image(&Config::default(), &options, 200));
    }

    #[test]
    fn test_avatar_disabled_in_config() {
        let config = Config {
            show_avatar: false,
            ..Default::default()
        };
        assert!(!wants_image(&config, &ShowOptions::default(), 200));
    }

    #[test]
    fn test_soft_results() {
        assert_eq!(soft("starred count", Ok::<u64, GhfetchError>(3)), Some(3));
        assert_eq!(
            soft::<u64>("pinned repositories", Err(GhfetchError::TokenMissing)),
            None
        );
        assert_eq!(
            soft::<u64>("starred count", Err(GhfetchError::Network("timeout".into()))),
            None
        );
    }
}
