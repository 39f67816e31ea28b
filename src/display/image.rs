//! Avatar display through `imgcat`
//!
//! The avatar is downloaded, written to a temporary `.png` and handed to
//! `imgcat`, which draws it at the cursor. The text block is then moved up
//! beside it with `compose_beside`. Nothing here is fatal: every failure
//! becomes `ImageOutcome::Skipped` and the caller falls back to text only.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crossterm::cursor::{MoveDown, MoveRight, MoveUp};
use crossterm::Command as _;
use url::Url;

use crate::error::{GhfetchError, Result};
use crate::github::client::GitHubClient;

const IMGCAT: &str = "imgcat";

/// Pixel size requested from the avatar CDN
const AVATAR_SIZE_PX: u32 = 400;

/// Result of trying to show the avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Avatar drawn; it spans `width_cells` columns
    Shown { width_cells: u16 },
    /// Avatar not drawn, with the reason
    Skipped(String),
}

/// Something that can draw an image file in the terminal
#[cfg_attr(test, mockall::automock)]
pub trait ImageBackend {
    /// Whether the backend can be used at all
    fn is_available(&self) -> bool;

    /// Draw `path` at the cursor, `height` rows tall
    fn show(&self, path: &Path, height: u16) -> Result<()>;
}

/// `imgcat` found on `PATH` or configured explicitly
#[derive(Debug, Clone)]
pub struct ImgcatBackend {
    command: Option<PathBuf>,
}

impl ImgcatBackend {
    /// Use `configured` when it points at a file, otherwise search `PATH`
    pub fn locate(configured: Option<&Path>) -> Self {
        let command = match configured {
            Some(path) if path.is_file() => Some(path.to_path_buf()),
            Some(path) => {
                tracing::warn!(path = %path.display(), "configured image_command not found, searching PATH");
                search_path()
            }
            None => search_path(),
        };

        Self { command }
    }

    /// Height flag the installed `imgcat` understands
    ///
    /// The pip package takes `--height`, the iTerm2 script takes `-H`.
    /// `None` when `--help` could not be run.
    fn height_flag(command: &Path) -> Option<&'static str> {
        let output = Command::new(command)
            .arg("--help")
            .stdin(Stdio::null())
            .output()
            .ok()?;

        let help = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
        .to_lowercase();

        if help.contains("--height") {
            Some("--height")
        } else {
            Some("-H")
        }
    }

    fn run(command: &Path, args: &[&OsStr]) -> Result<()> {
        let status = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| GhfetchError::ImageUnsupported(format!("cannot run imgcat: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(GhfetchError::ImageUnsupported(format!(
                "imgcat exited with {}",
                status
            )))
        }
    }
}

impl ImageBackend for ImgcatBackend {
    fn is_available(&self) -> bool {
        self.command.is_some()
    }

    fn show(&self, path: &Path, height: u16) -> Result<()> {
        let command = self
            .command
            .as_deref()
            .ok_or_else(|| GhfetchError::ImageUnsupported("imgcat is not installed".into()))?;

        // imgcat writes straight to the terminal; keep our output ordered
        io::stdout().flush()?;

        let height = height.to_string();
        let height = OsStr::new(&height);
        let file = path.as_os_str();

        match Self::height_flag(command) {
            Some(flag) => Self::run(command, &[OsStr::new(flag), height, file]),
            None => Self::run(command, &[OsStr::new("--height"), height, file])
                .or_else(|_| Self::run(command, &[file])),
        }
    }
}

fn search_path() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    find_in_path(IMGCAT, &path_var)
}

fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Avatar display adapter
pub struct AvatarDisplay<'a, B: ImageBackend> {
    client: &'a GitHubClient,
    backend: B,
}

impl<'a, B: ImageBackend> AvatarDisplay<'a, B> {
    pub fn new(client: &'a GitHubClient, backend: B) -> Self {
        Self { client, backend }
    }

    /// Draw the avatar `target_height` rows tall
    pub async fn display(&self, avatar_url: &str, target_height: u16) -> ImageOutcome {
        match self.try_display(avatar_url, target_height).await {
            Ok(width_cells) => ImageOutcome::Shown { width_cells },
            Err(e) => {
                tracing::debug!(error = %e, "avatar skipped");
                ImageOutcome::Skipped(e.to_string())
            }
        }
    }

    async fn try_display(&self, avatar_url: &str, target_height: u16) -> Result<u16> {
        if !self.backend.is_available() {
            return Err(GhfetchError::ImageUnsupported(
                "imgcat is not installed".into(),
            ));
        }

        let bytes = self.client.download(&sized_avatar_url(avatar_url)).await?;

        let mut file = tempfile::Builder::new()
            .prefix("ghfetch-avatar-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;

        self.backend.show(file.path(), target_height)?;

        // Avatars are square and a cell is about twice as tall as it is wide
        Ok(target_height.saturating_mul(2))
    }
}

/// Ask the avatar CDN for a square image of a fixed size
pub fn sized_avatar_url(avatar_url: &str) -> String {
    let Ok(mut url) = Url::parse(avatar_url) else {
        return avatar_url.to_string();
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "s")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("s", &AVATAR_SIZE_PX.to_string());

    url.into()
}

/// Position `lines` to the right of an image `image_height` rows tall that
/// was just printed, starting at column `text_column`
///
/// The cursor ends below whichever of the two is taller.
pub fn compose_beside(lines: &[String], image_height: u16, text_column: u16) -> String {
    let mut out = String::new();

    // Writing ANSI into a String cannot fail
    if image_height > 0 {
        let _ = MoveUp(image_height).write_ansi(&mut out);
    }

    for line in lines {
        if text_column > 0 {
            let _ = MoveRight(text_column).write_ansi(&mut out);
        }
        out.push_str(line);
        out.push('\n');
    }

    let remaining = (image_height as usize).saturating_sub(lines.len());
    if remaining > 0 {
        let _ = MoveDown(remaining as u16).write_ansi(&mut out);
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::ClientConfig;
    use tempfile::TempDir;

    fn client() -> GitHubClient {
        GitHubClient::new(ClientConfig::new("http://127.0.0.1:9", None)).unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_skipped() {
        let mut backend = MockImageBackend::new();
        backend.expect_is_available().return_const(false);
        backend.expect_show().never();

        let client = client();
        let outcome = AvatarDisplay::new(&client, backend)
            .display("http://127.0.0.1:9/u/1", 15)
            .await;

        assert!(matches!(outcome, ImageOutcome::Skipped(ref r) if r.contains("imgcat")));
    }

    #[tokio::test]
    async fn test_download_failure_is_skipped() {
        let mut backend = MockImageBackend::new();
        backend.expect_is_available().return_const(true);
        backend.expect_show().never();

        let client = client();
        let outcome = AvatarDisplay::new(&client, backend)
            .display("http://127.0.0.1:9/u/1", 15)
            .await;

        assert!(matches!(outcome, ImageOutcome::Skipped(_)));
    }

    #[test]
    fn test_sized_avatar_url() {
        assert_eq!(
            sized_avatar_url("https://avatars.githubusercontent.com/u/583231?v=4"),
            "https://avatars.githubusercontent.com/u/583231?v=4&s=400"
        );
        assert_eq!(
            sized_avatar_url("https://avatars.githubusercontent.com/u/1?s=40&v=4"),
            "https://avatars.githubusercontent.com/u/1?v=4&s=400"
        );
        assert_eq!(sized_avatar_url("not a url"), "not a url");
    }

    #[test]
    fn test_compose_beside_short_text() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            compose_beside(&lines, 3, 10),
            "\x1b[3A\x1b[10Ca\n\x1b[10Cb\n\x1b[1B\n"
        );
    }

    #[test]
    fn test_compose_beside_tall_text() {
        let lines: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        let out = compose_beside(&lines, 2, 5);
        assert!(out.starts_with("\x1b[2A"));
        assert!(!out.contains('B'));
        assert_eq!(out.matches("\x1b[5C").count(), 4);
        assert!(out.ends_with("3\n\n"));
    }

    #[test]
    fn test_find_in_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("imgcat"), "#!/bin/sh\n").unwrap();

        let path_var = std::env::join_paths(["/nonexistent-ghfetch-dir", dir.path().to_str().unwrap()])
            .unwrap();
        assert_eq!(
            find_in_path("imgcat", &path_var),
            Some(dir.path().join("imgcat"))
        );
        assert_eq!(find_in_path("not-imgcat", &path_var), None);
    }

    #[test]
    fn test_locate_prefers_configured_file() {
        let dir = TempDir::new().unwrap();
        let configured = dir.path().join("my-imgcat");
        std::fs::write(&configured, "#!/bin/sh\n").unwrap();

        let backend = ImgcatBackend::locate(Some(&configured));
        assert!(backend.is_available());
        assert_eq!(backend.command, Some(configured));
    }
}
