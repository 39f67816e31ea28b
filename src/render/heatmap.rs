//! Contribution heatmap
//!
//! Seven weekday rows with one column per week, newest week on the right.
//! When the terminal is too narrow for a full year, the oldest weeks are
//! dropped.

use chrono::Datelike;

use crate::github::models::{ContributionCalendar, ContributionWeek};
use crate::render::style::{Palette, Role};
use crate::render::text::{truncate, wrap};

/// Weekday labels, Sunday first
const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Columns taken by a weekday label and its trailing space
const LABEL_WIDTH: usize = 2;

/// Visible width of the legend line
const LEGEND_WIDTH: usize = 28;

/// Intensity bucket for a day, 0 (none) to 4 (most)
///
/// Buckets are quartiles of the busiest day, with floors so small counts
/// still spread across levels.
pub fn level(count: u64, max: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let q1 = (max / 4).max(1);
    let q2 = (max / 2).max(2);
    let q3 = (3 * max / 4).max(3);

    if count <= q1 {
        1
    } else if count <= q2 {
        2
    } else if count <= q3 {
        3
    } else {
        4
    }
}

fn block(palette: &Palette, level: u8) -> String {
    match level {
        0 => palette.paint(Role::Value, "·"),
        1 | 2 => palette.paint(Role::Heat(level), "▪"),
        _ => palette.paint(Role::Heat(level), "■"),
    }
}

/// Number of week columns that fit in `width`
fn weeks_that_fit(width: usize) -> usize {
    // label + n blocks separated by single spaces
    width.saturating_sub(LABEL_WIDTH - 1) / 2
}

/// Render the heatmap section
///
/// `calendar` is `None` when the data could not be fetched.
pub fn render_heatmap(
    username: &str,
    calendar: Option<&ContributionCalendar>,
    width: usize,
    palette: &Palette,
) -> Vec<String> {
    let Some(calendar) = calendar else {
        return unavailable_lines(width, palette);
    };

    let has_days = calendar.weeks.iter().any(|w| !w.days.is_empty());
    if calendar.total == 0 || !has_days {
        let message = format!(
            "No contributions found for user '{}' in the past year.",
            username
        );
        return wrap(&message, width)
            .iter()
            .map(|l| palette.paint(Role::Label, l))
            .collect();
    }

    let mut lines = Vec::new();

    let total = calendar.total.to_string();
    let heading = "Contributions: ";
    if heading.len() + total.len() <= width {
        lines.push(format!(
            "{}{}",
            palette.paint(Role::Title, heading),
            palette.paint(Role::Stars, &total)
        ));
    } else {
        lines.push(palette.paint(Role::Stars, &truncate(&total, width)));
    }

    let shown = weeks_that_fit(width).min(calendar.weeks.len());
    if shown == 0 {
        return lines;
    }
    let weeks = &calendar.weeks[calendar.weeks.len() - shown..];
    let max = calendar.max_day();

    lines.push(month_header(weeks, width, palette));

    for (day_idx, label) in DAY_LABELS.iter().enumerate() {
        let cells: Vec<String> = weeks
            .iter()
            .map(|week| {
                week.days
                    .iter()
                    .find(|d| d.date.weekday().num_days_from_sunday() as usize == day_idx)
                    .map(|d| block(palette, level(d.count, max)))
                    .unwrap_or_else(|| " ".to_string())
            })
            .collect();

        lines.push(format!(
            "{} {}",
            palette.paint(Role::Label, label),
            cells.join(" ")
        ));
    }

    if width >= LEGEND_WIDTH {
        lines.push(format!(
            "{}None {}Few {}Some {}Many {}Lots",
            block(palette, 0),
            block(palette, 1),
            block(palette, 2),
            block(palette, 3),
            block(palette, 4)
        ));
    }

    lines
}

/// Month abbreviations placed over the first week of each month
fn month_header(weeks: &[ContributionWeek], width: usize, palette: &Palette) -> String {
    let mut header = " ".repeat(LABEL_WIDTH);
    let mut cursor = LABEL_WIDTH;
    let mut last_month = None;

    for (idx, week) in weeks.iter().enumerate() {
        let Some(first) = week.days.first() else {
            continue;
        };
        let month = first.date.month();
        if last_month == Some(month) {
            continue;
        }
        last_month = Some(month);

        let column = LABEL_WIDTH + idx * 2;
        let name = first.date.format("%b").to_string();
        // Skip labels that would collide with the previous one or overflow
        if column < cursor || column + name.len() > width {
            continue;
        }

        header.push_str(&" ".repeat(column - cursor));
        header.push_str(&palette.paint(Role::Count, &name));
        cursor = column + name.len() + 1;
        header.push(' ');
    }

    header.trim_end().to_string()
}

fn unavailable_lines(width: usize, palette: &Palette) -> Vec<String> {
    let mut lines: Vec<String> = wrap("No contribution data available.", width)
        .iter()
        .map(|l| palette.paint(Role::Error, l))
        .collect();

    for hint in [
        "Please check if:",
        "  1. Your GitHub token is valid (try 'ghfetch --reset-token')",
        "  2. The username exists on GitHub",
        "  3. The user has public contribution activity",
    ] {
        lines.push(palette.paint(Role::Muted, &truncate(hint, width)));
    }

    lines
}
