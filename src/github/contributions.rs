//! Contribution calendar via GraphQL

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{GhfetchError, Result};
use crate::github::client::GitHubClient;
use crate::github::models::{ContributionCalendar, ContributionsUser};

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
    user(login: $login) {
        contributionsCollection(from: $from, to: $to) {
            contributionCalendar {
                totalContributions
                weeks {
                    contributionDays {
                        date
                        contributionCount
                    }
                }
            }
        }
    }
}
"#;

#[derive(Serialize)]
struct CalendarVariables<'a> {
    login: &'a str,
    from: String,
    to: String,
}

/// Fetch the contribution calendar between two instants
///
/// Requires a token; fails with `TokenMissing` otherwise.
pub async fn fetch_contributions(
    client: &GitHubClient,
    username: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<ContributionCalendar> {
    let variables = CalendarVariables {
        login: username,
        from: from.to_rfc3339_opts(SecondsFormat::Secs, true),
        to: to.to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    let user: Option<ContributionsUser> = client
        .graphql_user(CONTRIBUTIONS_QUERY, &variables, username)
        .await?;

    let user = user.ok_or_else(|| GhfetchError::UserNotFound(username.to_string()))?;
    let calendar = ContributionCalendar::from(user.contributions_collection.contribution_calendar);

    tracing::debug!(
        total = calendar.total,
        weeks = calendar.weeks.len(),
        "contributions fetched"
    );
    Ok(calendar)
}

/// Fetch the last 365 days of contributions
pub async fn fetch_last_year(client: &GitHubClient, username: &str) -> Result<ContributionCalendar> {
    let to = Utc::now();
    let from = to - chrono::Duration::days(365);
    fetch_contributions(client, username, from, to).await
}
