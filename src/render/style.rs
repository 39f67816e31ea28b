//! Output colors and hyperlinks
//!
//! Every colored span goes through `Palette`, so switching colors off
//! yields plain text with no escape sequences at all.

use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

/// What a span of text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// `login@github` title and section headers
    Title,
    /// Field labels (`Followers:`)
    Label,
    /// Plain field values
    Value,
    /// Numeric values
    Count,
    Border,
    RepoName,
    Stars,
    Forks,
    /// Hints and placeholders
    Muted,
    Error,
    /// Heatmap intensity 1 (lightest) to 4 (darkest)
    Heat(u8),
}

impl Role {
    fn color(self) -> Option<Color> {
        match self {
            Role::Title | Role::Border => Some(Color::AnsiValue(149)),
            Role::Label | Role::Stars => Some(Color::AnsiValue(11)),
            Role::Value => None,
            Role::Count | Role::Forks => Some(Color::AnsiValue(45)),
            Role::RepoName => Some(Color::AnsiValue(208)),
            Role::Muted => Some(Color::AnsiValue(244)),
            Role::Error => Some(Color::AnsiValue(1)),
            Role::Heat(1) => Some(Color::AnsiValue(118)),
            Role::Heat(2) | Role::Heat(3) => Some(Color::AnsiValue(149)),
            Role::Heat(_) => Some(Color::AnsiValue(22)),
        }
    }
}

/// Application color palette
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Palette that emits ANSI colors and OSC 8 hyperlinks
    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// Palette that emits plain text
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Colors only when configured, stdout is a terminal and `NO_COLOR` is unset
    pub fn detect(color_configured: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            enabled: color_configured && !no_color && std::io::stdout().is_terminal(),
        }
    }

    /// Wrap `text` in the color for `role`
    pub fn paint(&self, role: Role, text: &str) -> String {
        match role.color() {
            Some(color) if self.enabled => format!("{}", text.with(color)),
            _ => text.to_string(),
        }
    }

    /// Make `text` a clickable link in terminals that support OSC 8
    pub fn link(&self, url: &str, text: &str) -> String {
        if self.enabled {
            let url: String = url.chars().filter(|c| !c.is_control()).collect();
            format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}
