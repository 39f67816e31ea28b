//! Typed records for the GitHub responses ghfetch reads
//!
//! Raw `serde` shapes stay private to this module; callers only see the
//! validated records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A user's public profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Login name (`octocat`)
    pub login: String,
    /// Display name
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Blog or website, often without a scheme
    pub blog: Option<String>,
    pub avatar_url: String,
    pub html_url: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Link to the user's page on github.com
    pub fn profile_url(&self) -> String {
        self.html_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.login))
    }
}

/// A repository as shown in the pinned list
#[derive(Debug, Clone, PartialEq)]
pub struct RepoSummary {
    pub name: String,
    /// Owner login, which may differ from the profile for org repos
    pub owner: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
}

impl RepoSummary {
    /// Link to the repository on github.com
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

/// Result of validating a token against `GET /user`
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// Login the token belongs to
    pub login: String,
    /// OAuth scopes granted (empty for fine-grained tokens)
    pub scopes: Vec<String>,
}

impl TokenInfo {
    /// Whether the token can read profile data for pinned items and contributions
    pub fn can_read_user(&self) -> bool {
        self.scopes.iter().any(|s| s == "read:user" || s == "user")
    }
}

/// A year of contributions
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionCalendar {
    pub total: u64,
    pub weeks: Vec<ContributionWeek>,
}

/// One calendar column, Sunday first
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionWeek {
    pub days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
}

impl ContributionCalendar {
    /// Highest single-day count
    pub fn max_day(&self) -> u64 {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| d.count)
            .max()
            .unwrap_or(0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GraphQL envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinnedUser {
    pub pinned_items: NodeList<PinnedNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinnedNode {
    pub name: String,
    pub description: Option<String>,
    pub owner: OwnerNode,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<LanguageNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageNode {
    pub name: String,
}

impl From<PinnedNode> for RepoSummary {
    fn from(node: PinnedNode) -> Self {
        Self {
            name: node.name,
            owner: node.owner.login,
            description: node.description.filter(|d| !d.trim().is_empty()),
            stars: node.stargazer_count,
            forks: node.fork_count,
            language: node.primary_language.map(|l| l.name),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionsCollection {
    pub contribution_calendar: CalendarNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarNode {
    pub total_contributions: u64,
    #[serde(default)]
    pub weeks: Vec<WeekNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WeekNode {
    #[serde(default)]
    pub contribution_days: Vec<DayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayNode {
    pub date: NaiveDate,
    pub contribution_count: u64,
}

impl From<CalendarNode> for ContributionCalendar {
    fn from(node: CalendarNode) -> Self {
        Self {
            total: node.total_contributions,
            weeks: node
                .weeks
                .into_iter()
                .map(|w| ContributionWeek {
                    days: w
                        .contribution_days
                        .into_iter()
                        .map(|d| ContributionDay {
                            date: d.date,
                            count: d.contribution_count,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
