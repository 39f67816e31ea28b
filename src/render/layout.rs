//! Profile card layout
//!
//! Turns a `ProfileCard` into display lines for a given terminal width:
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ octocat@github               │
//! │ --------------               │
//! │ Name:      The Octocat       │
//! │ Followers: 17000             │
//! │ ...                          │
//! ╰──────────────────────────────╯
//! ```
//!
//! Below `MIN_BOXED_WIDTH` columns the border is dropped and each label sits
//! on its own line above its value.

use url::Url;

use crate::github::models::{ContributionCalendar, Profile, RepoSummary};
use crate::render::heatmap::render_heatmap;
use crate::render::style::{Palette, Role};
use crate::render::text::{pad_to, sanitize, truncate, visible_width, wrap};

/// Narrower terminals get the single-column, border-less layout
pub const MIN_BOXED_WIDTH: usize = 40;

/// `"│ "` on the left plus `" │"` on the right
const BORDER_OVERHEAD: usize = 4;

/// Indent of pinned repository descriptions
const DESCRIPTION_INDENT: &str = "   ";

/// What fills the bottom of the card
#[derive(Debug, Clone, Copy)]
pub enum Showcase<'a> {
    /// Pinned repositories, in profile order
    Pinned(&'a [RepoSummary]),
    /// Contribution heatmap; `None` when it could not be fetched
    Heatmap(Option<&'a ContributionCalendar>),
}

/// Everything the renderer needs for one profile
#[derive(Debug, Clone, Copy)]
pub struct ProfileCard<'a> {
    pub profile: &'a Profile,
    /// `None` when the starred count could not be fetched
    pub starred: Option<u64>,
    /// Whether an API token was available for this run
    pub has_token: bool,
    pub showcase: Showcase<'a>,
}

impl<'a> ProfileCard<'a> {
    /// Card with pinned repositories
    pub fn new(profile: &'a Profile, pinned: &'a [RepoSummary], has_token: bool) -> Self {
        Self {
            profile,
            starred: None,
            has_token,
            showcase: Showcase::Pinned(pinned),
        }
    }

    pub fn with_starred(mut self, starred: Option<u64>) -> Self {
        self.starred = starred;
        self
    }

    /// Show the contribution heatmap instead of pinned repositories
    pub fn with_heatmap(mut self, calendar: Option<&'a ContributionCalendar>) -> Self {
        self.showcase = Showcase::Heatmap(calendar);
        self
    }
}

/// A labelled field value
enum Value {
    /// Free text, word-wrapped under the value column
    Wrapped(String),
    /// Short text, truncated to one line
    Single(String),
    /// Number, colored as a count
    Count(u64),
    /// Text linked to a URL, word-wrapped
    Link { text: String, url: Option<String> },
}

/// Layout renderer
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Render the card for a terminal `terminal_width` columns wide
    ///
    /// Every returned line is at most `terminal_width` visible columns.
    pub fn render(&self, card: &ProfileCard<'_>, terminal_width: usize) -> Vec<String> {
        let terminal_width = terminal_width.max(1);

        if terminal_width < MIN_BOXED_WIDTH {
            return self.body(card, terminal_width, true);
        }

        let content_width = terminal_width - BORDER_OVERHEAD;
        let body = self.body(card, content_width, false);
        self.frame(body, content_width)
    }

    /// Content lines in fixed order
    fn body(&self, card: &ProfileCard<'_>, width: usize, stacked: bool) -> Vec<String> {
        let mut lines = self.title(card.profile, width);

        let fields = self.fields(card);
        let label_width = fields.iter().map(|(l, _)| l.len() + 1).max().unwrap_or(0) + 1;

        for (label, value) in &fields {
            if stacked {
                self.push_stacked(&mut lines, label, value, width);
            } else {
                self.push_field(&mut lines, label, value, label_width, width);
            }
        }

        match card.showcase {
            Showcase::Pinned(repos) => self.push_pinned(&mut lines, card, repos, width),
            Showcase::Heatmap(calendar) => lines.extend(render_heatmap(
                &card.profile.login,
                calendar,
                width,
                &self.palette,
            )),
        }

        lines
    }

    /// `login@github` linked to the profile, plus an underline
    fn title(&self, profile: &Profile, width: usize) -> Vec<String> {
        const SUFFIX: &str = "@github";
        let p = &self.palette;

        let login = sanitize(&profile.login);

        let title = if visible_width(&login) + SUFFIX.len() <= width {
            format!(
                "{}{}{}",
                p.paint(Role::Title, &login),
                p.paint(Role::Value, "@"),
                p.paint(Role::Title, "github")
            )
        } else {
            p.paint(Role::Title, &truncate(&login, width))
        };

        let title_width = visible_width(&title);
        vec![
            p.link(&profile.profile_url(), &title),
            p.paint(Role::Title, &"-".repeat(title_width)),
        ]
    }

    fn fields(&self, card: &ProfileCard<'_>) -> Vec<(&'static str, Value)> {
        let profile = card.profile;
        let text_or = |v: &Option<String>, fallback: &str| {
            v.as_deref()
                .map(sanitize)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        let blog = profile.blog.as_deref().map(sanitize);
        let website = match blog.as_deref().map(str::trim) {
            Some(blog) if !blog.is_empty() => Value::Link {
                text: blog.to_string(),
                url: website_url(blog),
            },
            _ => Value::Single("N/A".into()),
        };

        vec![
            ("Name", Value::Single(text_or(&profile.name, "N/A"))),
            ("Bio", Value::Wrapped(text_or(&profile.bio, "N/A"))),
            ("Company", Value::Single(text_or(&profile.company, "N/A"))),
            ("From", Value::Single(text_or(&profile.location, "Not Provided"))),
            (
                "Joined",
                Value::Single(profile.created_at.format("%b %d, %Y").to_string()),
            ),
            ("Repos", Value::Count(profile.public_repos)),
            ("Followers", Value::Count(profile.followers)),
            ("Following", Value::Count(profile.following)),
            (
                "Starred",
                match card.starred {
                    Some(n) => Value::Count(n),
                    None => Value::Single("N/A".into()),
                },
            ),
            ("Website", website),
        ]
    }

    /// Value lines for `value` at most `width` columns wide
    fn value_lines(&self, value: &Value, width: usize) -> Vec<String> {
        let p = &self.palette;
        match value {
            Value::Wrapped(text) => wrap(text, width),
            Value::Single(text) => vec![truncate(text, width)],
            Value::Count(n) => vec![p.paint(Role::Count, &truncate(&n.to_string(), width))],
            Value::Link { text, url } => {
                let lines = wrap(text, width);
                match url {
                    Some(url) => lines.iter().map(|l| p.link(url, l)).collect(),
                    None => lines,
                }
            }
        }
    }

    /// `Label:    value` with continuation lines under the value column
    fn push_field(
        &self,
        lines: &mut Vec<String>,
        label: &str,
        value: &Value,
        label_width: usize,
        width: usize,
    ) {
        let value_width = width.saturating_sub(label_width).max(1);
        let label = pad_to(&format!("{}:", label), label_width);
        let label = self.palette.paint(Role::Label, &label);
        let indent = " ".repeat(label_width);

        for (i, line) in self.value_lines(value, value_width).into_iter().enumerate() {
            if i == 0 {
                lines.push(format!("{}{}", label, line));
            } else {
                lines.push(format!("{}{}", indent, line));
            }
        }
    }

    /// Narrow layout: label on its own line, value below at full width
    fn push_stacked(&self, lines: &mut Vec<String>, label: &str, value: &Value, width: usize) {
        let label = truncate(&format!("{}:", label), width);
        lines.push(self.palette.paint(Role::Label, &label));
        lines.extend(self.value_lines(value, width));
    }

    fn push_pinned(
        &self,
        lines: &mut Vec<String>,
        card: &ProfileCard<'_>,
        repos: &[RepoSummary],
        width: usize,
    ) {
        let p = &self.palette;

        if !card.has_token {
            let hint = truncate("Pinned repos need a token: ghfetch --config", width);
            lines.push(p.paint(Role::Muted, &hint));
            return;
        }

        if repos.is_empty() {
            return;
        }

        lines.push(p.paint(
            Role::Title,
            &truncate("Pinned Repositories:", width),
        ));

        for repo in repos {
            lines.push(self.repo_header(repo, width));

            if let Some(description) = &repo.description {
                let desc_width = width.saturating_sub(DESCRIPTION_INDENT.len()).max(1);
                for line in wrap(&sanitize(description), desc_width) {
                    if DESCRIPTION_INDENT.len() + visible_width(&line) <= width {
                        lines.push(format!("{}{}", DESCRIPTION_INDENT, line));
                    } else {
                        lines.push(line);
                    }
                }
            }
        }
    }

    /// ` ● name (★ 12 / ⑂ 3) · Rust`, shortened to fit `width`
    fn repo_header(&self, repo: &RepoSummary, width: usize) -> String {
        let p = &self.palette;
        let dot_role = if repo.language.is_some() {
            Role::Title
        } else {
            Role::Value
        };

        let stars = format!("★ {}", repo.stars);
        let forks = format!("⑂ {}", repo.forks);
        let stats_width = visible_width(&stars) + visible_width(&forks) + 6; // " (" + " / " + ")"
        let language = repo
            .language
            .as_deref()
            .map(|l| format!(" · {}", sanitize(l)))
            .unwrap_or_default();
        let repo_name = sanitize(&repo.name);

        let fixed = 3 + stats_width; // " ● "
        let mut language_width = visible_width(&language);
        if fixed + language_width + 1 > width {
            language_width = 0;
        }

        if fixed + 1 > width {
            // Not even the stats fit; show the bare name
            return p.link(
                &repo.url(),
                &p.paint(Role::RepoName, &truncate(&repo_name, width)),
            );
        }

        let name = truncate(&repo_name, width - fixed - language_width);
        let mut header = format!(
            " {} {} ({} / {})",
            p.paint(dot_role, "●"),
            p.link(&repo.url(), &p.paint(Role::RepoName, &name)),
            p.paint(Role::Stars, &stars),
            p.paint(Role::Forks, &forks)
        );
        if language_width > 0 {
            header.push_str(&p.paint(Role::Muted, &language));
        }
        header
    }

    /// Draw a rounded box around `body`, sized to its longest line
    fn frame(&self, body: Vec<String>, content_width: usize) -> Vec<String> {
        let p = &self.palette;
        let inner = body
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(0)
            .clamp(1, content_width);

        let rule = "─".repeat(inner + 2);
        let left = p.paint(Role::Border, "│");
        let right = p.paint(Role::Border, "│");

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(p.paint(Role::Border, &format!("╭{}╮", rule)));
        for line in body {
            lines.push(format!("{} {} {}", left, pad_to(&line, inner), right));
        }
        lines.push(p.paint(Role::Border, &format!("╰{}╯", rule)));
        lines
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Clickable URL for a blog field, adding `https://` when the scheme is missing
fn website_url(blog: &str) -> Option<String> {
    let candidate = if blog.starts_with("http://") || blog.starts_with("https://") {
        blog.to_string()
    } else {
        format!("https://{}", blog)
    };

    Url::parse(&candidate).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::strip_ansi;
    use chrono::{TimeZone, Utc};

    fn profile() -> Profile {
        Profile {
            login: "ada".into(),
            name: Some("Ada".into()),
            bio: Some("Computer scientist".into()),
            company: None,
            location: Some("London".into()),
            blog: Some("ada.dev".into()),
            avatar_url: "https://avatars.githubusercontent.com/u/1?v=4".into(),
            html_url: None,
            followers: 42,
            following: 7,
            public_repos: 3,
            created_at: Utc.with_ymd_and_hms(2015, 12, 10, 9, 0, 0).unwrap(),
        }
    }

    fn repos() -> Vec<RepoSummary> {
        vec![
            RepoSummary {
                name: "analytical-engine".into(),
                owner: "ada".into(),
                description: Some("Notes on the engine, with an algorithm for Bernoulli numbers".into()),
                stars: 1843,
                forks: 12,
                language: Some("Rust".into()),
            },
            RepoSummary {
                name: "letters".into(),
                owner: "ada".into(),
                description: None,
                stars: 0,
                forks: 0,
                language: None,
            },
        ]
    }

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| strip_ansi(l).into_owned()).collect()
    }

    #[test]
    fn test_example_card_at_80_columns() {
        let profile = profile();
        let card = ProfileCard::new(&profile, &[], true);
        let lines = Renderer::new(Palette::colored()).render(&card, 80);
        let text = plain(&lines);

        for line in &lines {
            assert!(visible_width(line) <= 80, "{line:?}");
        }
        assert!(text[0].starts_with('╭'));
        assert!(text.last().unwrap().starts_with('╰'));

        let find = |needle: &str| {
            text.iter()
                .position(|l| l.contains(needle))
                .unwrap_or_else(|| panic!("{needle} missing"))
        };
        let name = find("Ada ");
        let bio = find("Computer scientist");
        let followers = find("42");
        assert!(name != bio && bio != followers && name != followers);
        assert!(text[followers].contains("Followers:"));
    }

    #[test]
    fn test_box_lines_share_width() {
        let profile = profile();
        let repos = repos();
        let card = ProfileCard::new(&profile, &repos, true).with_starred(Some(5));
        let lines = Renderer::new(Palette::colored()).render(&card, 100);

        let widths: Vec<usize> = lines.iter().map(|l| visible_width(l)).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(widths[0] <= 100);
    }

    #[test]
    fn test_long_bio_wraps_within_content_width() {
        let mut profile = profile();
        profile.bio = Some(
            "Mathematician and writer, chiefly known for her work on Charles Babbage's \
             proposed mechanical general-purpose computer, the Analytical Engine. \
             Thisisanextremelylongwordwithoutanyspacesthatmustbesplitsomewhere."
                .into(),
        );

        for width in [40, 47, 60, 80, 120] {
            let card = ProfileCard::new(&profile, &[], true);
            let lines = Renderer::new(Palette::plain()).render(&card, width);
            let content_width = width - BORDER_OVERHEAD;

            let bio_start = lines.iter().position(|l| l.contains("Bio:")).unwrap();
            let bio_end = lines.iter().position(|l| l.contains("Company:")).unwrap();
            assert!(bio_end - bio_start > 1, "bio should wrap at {width}");
            for line in &lines[bio_start..bio_end] {
                // strip the "│ " and " │" border
                let inner: String = line.chars().skip(2).take(content_width).collect();
                assert!(visible_width(inner.trim_end()) <= content_width);
                assert!(visible_width(line) <= width);
            }
        }
    }

    #[test]
    fn test_no_token_has_empty_pinned_section() {
        let profile = profile();
        let card = ProfileCard::new(&profile, &[], false);
        let text = plain(&Renderer::new(Palette::plain()).render(&card, 80));

        assert!(!text.iter().any(|l| l.contains("Pinned Repositories:")));
        assert!(!text.iter().any(|l| l.contains('●')));
        assert!(text.iter().any(|l| l.contains("ghfetch --config")));
    }

    #[test]
    fn test_pinned_repositories() {
        let profile = profile();
        let repos = repos();
        let card = ProfileCard::new(&profile, &repos, true);
        let text = plain(&Renderer::new(Palette::plain()).render(&card, 80));

        let header = text
            .iter()
            .position(|l| l.contains("Pinned Repositories:"))
            .unwrap();
        assert!(text[header + 1].contains("● analytical-engine (★ 1843 / ⑂ 12) · Rust"));
        assert!(text[header + 2].contains("   Notes on the engine"));
        assert!(text.iter().any(|l| l.contains("● letters (★ 0 / ⑂ 0)")));
    }

    #[test]
    fn test_field_order() {
        let profile = profile();
        let card = ProfileCard::new(&profile, &[], true).with_starred(Some(9));
        let text = plain(&Renderer::new(Palette::plain()).render(&card, 80));

        let order = [
            "ada@github", "Name:", "Bio:", "Company:", "From:", "Joined:", "Repos:",
            "Followers:", "Following:", "Starred:", "Website:",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|n| text.iter().position(|l| l.contains(n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_values_use_placeholders() {
        let mut profile = profile();
        profile.bio = None;
        profile.location = Some("   ".into());
        profile.blog = Some(String::new());
        let card = ProfileCard::new(&profile, &[], true);
        let text = plain(&Renderer::new(Palette::plain()).render(&card, 80));

        let line = |label: &str| text.iter().find(|l| l.contains(label)).unwrap().clone();
        assert!(line("Bio:").contains("N/A"));
        assert!(line("From:").contains("Not Provided"));
        assert!(line("Website:").contains("N/A"));
        assert!(line("Starred:").contains("N/A"));
        assert!(line("Company:").contains("N/A"));
        assert!(line("Joined:").contains("Dec 10, 2015"));
    }

    #[test]
    fn test_narrow_terminal_has_no_border() {
        let profile = profile();
        let repos = repos();
        let card = ProfileCard::new(&profile, &repos, true);
        let lines = Renderer::new(Palette::colored()).render(&card, 30);
        let text = plain(&lines);

        assert!(!text.iter().any(|l| l.contains('│') || l.contains('╭')));
        for line in &lines {
            assert!(visible_width(line) <= 30, "{line:?}");
        }
        let label = text.iter().position(|l| l == "Followers:").unwrap();
        assert_eq!(text[label + 1], "42");
    }

    #[test]
    fn test_tiny_widths_never_overflow() {
        let profile = profile();
        let repos = repos();
        for width in 1..60 {
            let card = ProfileCard::new(&profile, &repos, true).with_starred(Some(123));
            for line in Renderer::new(Palette::colored()).render(&card, width) {
                assert!(visible_width(&line) <= width, "{width}: {line:?}");
            }
        }
    }

    #[test]
    fn test_wide_character_bio_fits_terminal() {
        let mut profile = profile();
        profile.name = Some("田中太郎".into());
        profile.bio = Some(
            "東京を拠点に活動するソフトウェアエンジニアです。分散システムとコンパイラと型理論が大好きで毎日コードを書いています。"
                .into(),
        );
        profile.location = Some("東京都渋谷区神宮前一丁目二番地三号室".into());
        let mut repos = repos();
        repos[0].name = "分散キャッシュエンジンの実装".into();
        repos[0].description = Some("高速でスケーラブルな分散キャッシュエンジン。".into());

        for width in [30, 40, 60, 80] {
            let card = ProfileCard::new(&profile, &repos, true);
            let lines = Renderer::new(Palette::colored()).render(&card, width);

            let widths: Vec<usize> = lines.iter().map(|l| visible_width(l)).collect();
            let widest = widths.iter().copied().max().unwrap();
            assert!(widest <= width, "widest line is {widest} columns at {width}");
            if width >= MIN_BOXED_WIDTH {
                assert!(widths.iter().all(|w| *w == widths[0]), "border misaligned at {width}");
            }
        }
    }

    #[test]
    fn test_control_characters_are_not_rendered() {
        let mut profile = profile();
        profile.bio = Some("hello\x1b[2J\x1b]8;;http://evil\x07world".into());
        profile.company = Some("Acme\rCorp".into());
        let mut repos = repos();
        repos[0].description = Some("desc\x1b[31mred".into());

        let card = ProfileCard::new(&profile, &repos, true);
        let lines = Renderer::new(Palette::plain()).render(&card, 80);

        assert!(lines.iter().all(|l| !l.chars().any(|c| c.is_control())));
        assert!(lines.iter().any(|l| l.contains("hello[2J]8;;http://evilworld")));
        assert!(lines.iter().any(|l| l.contains("AcmeCorp")));
    }

    #[test]
    fn test_heatmap_replaces_pinned() {
        let profile = profile();
        let repos = repos();
        let card = ProfileCard::new(&profile, &repos, true).with_heatmap(None);
        let text = plain(&Renderer::new(Palette::plain()).render(&card, 80));

        assert!(!text.iter().any(|l| l.contains("Pinned Repositories:")));
        assert!(text.iter().any(|l| l.contains("No contribution data available.")));
    }

    #[test]
    fn test_website_url() {
        assert_eq!(website_url("ada.dev").as_deref(), Some("https://ada.dev/"));
        assert_eq!(
            website_url("http://example.com/blog").as_deref(),
            Some("http://example.com/blog")
        );
        assert_eq!(website_url("not a url"), None);
    }
}
