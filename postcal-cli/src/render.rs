//! TUI rendering for postcal types.
//!
//! Extension traits and helpers that add colored terminal output to
//! postcal-core types using owo_colors.

use chrono::Weekday;
use owo_colors::OwoColorize;
use postcal_core::grid::{CalendarCell, MonthGrid};
use postcal_core::month::YearMonth;
use postcal_core::sink::PersistenceSink;
use postcal_core::stats::Stats;
use postcal_core::{Platform, Post, PostStatus, PostStore};

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 16;

/// Title preview length in one-line post listings.
const TITLE_PREVIEW_LEN: usize = 30;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PostStatus {
    fn render(&self) -> String {
        let label = self.label();
        match self {
            PostStatus::Draft => label.dimmed().to_string(),
            PostStatus::CopyReady => label.yellow().to_string(),
            PostStatus::Scheduled => label.blue().to_string(),
            PostStatus::Published => label.green().to_string(),
        }
    }
}

impl Render for Platform {
    fn render(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }
}

impl Render for Post {
    /// One line: id, title preview, pillar and platform icons.
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}",
            format!("#{}", self.id).dimmed(),
            truncate(&self.title, TITLE_PREVIEW_LEN).bold()
        );

        if let Some(pillar) = &self.content_pillar {
            line.push_str(&format!(" {}", format!("[{pillar}]").cyan()));
        }

        line.push_str(&format!(" {}", self.status.render()));

        if !self.platforms.is_empty() {
            let icons: Vec<_> = self.platforms.iter().map(Platform::icon).collect();
            line.push_str(&format!(" {}", icons.join(" ")));
        }

        line
    }
}

/// Full field listing for a single post.
pub fn post_details(post: &Post) -> String {
    let mut lines = vec![post.render()];

    let mut field = |name: &str, value: String| {
        lines.push(format!("   {} {}", format!("{name}:").dimmed(), value));
    };

    field("date", post.date_key());
    if let Some(link) = &post.link {
        field("link", link.underline().to_string());
    }
    if let Some(content_type) = &post.content_type {
        field("type", content_type.clone());
    }
    if !post.platforms.is_empty() {
        let platforms: Vec<_> = post.platforms.iter().map(Render::render).collect();
        field("platforms", platforms.join(", "));
    }
    if let Some(notes) = &post.notes {
        field("notes", notes.clone());
    }
    if let Some(comments) = &post.comments {
        field("comments", comments.clone());
    }

    lines.join("\n")
}

/// Render a month as a grid of day columns with each day's posts listed
/// under its number.
pub fn month_grid<S: PersistenceSink>(grid: &MonthGrid, store: &PostStore<S>) -> String {
    let mut lines = Vec::new();

    let title = YearMonth::new(grid.year(), grid.month())
        .map(|m| m.to_string())
        .unwrap_or_default();
    let total_width = CELL_WIDTH * 7 + 6;
    lines.push(format!("{:^width$}", title, width = total_width).bold().to_string());
    lines.push(String::new());

    let headers: Vec<String> = grid
        .weekday_headers()
        .iter()
        .map(|d| format!("{:<width$}", weekday_name(*d), width = CELL_WIDTH).bold().to_string())
        .collect();
    lines.push(headers.join(" "));
    lines.push("─".repeat(total_width).dimmed().to_string());

    for week in grid.populate(store) {
        let rows = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Day { posts, .. } => posts.len() + 1,
                CalendarCell::Empty => 1,
            })
            .max()
            .unwrap_or(1);

        for row in 0..rows {
            let cells: Vec<String> = week.iter().map(|cell| grid_cell_line(cell, row)).collect();
            lines.push(cells.join(" ").trim_end().to_string());
        }
        lines.push("─".repeat(total_width).dimmed().to_string());
    }

    lines.join("\n")
}

/// One text row of a grid cell, padded to the column width.
fn grid_cell_line(cell: &CalendarCell, row: usize) -> String {
    let blank = " ".repeat(CELL_WIDTH);

    let CalendarCell::Day { day, posts, .. } = cell else {
        return blank;
    };

    if row == 0 {
        return format!("{:<width$}", day, width = CELL_WIDTH).bold().to_string();
    }

    match posts.get(row - 1) {
        Some(post) => {
            let text = truncate(&format!("#{} {}", post.id, post.title), CELL_WIDTH);
            let padded = format!("{:<width$}", text, width = CELL_WIDTH);
            colorize_status(post.status, &padded)
        }
        None => blank,
    }
}

fn colorize_status(status: PostStatus, text: &str) -> String {
    match status {
        PostStatus::Draft => text.to_string(),
        PostStatus::CopyReady => text.yellow().to_string(),
        PostStatus::Scheduled => text.blue().to_string(),
        PostStatus::Published => text.green().to_string(),
    }
}

pub fn stats(stats: &Stats) -> String {
    let mut lines = vec![format!("{} {}", "Total posts:".bold(), stats.total)];

    if stats.total == 0 {
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("By status".bold().to_string());
    for (status, count) in &stats.by_status {
        lines.push(format!("   {}: {}", status.render(), count));
    }

    if !stats.by_platform.is_empty() {
        lines.push(String::new());
        lines.push("By platform".bold().to_string());
        for (platform, count) in &stats.by_platform {
            lines.push(format!("   {}: {}", platform.render(), count));
        }
    }

    lines.join("\n")
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Cut `s` to at most `max` characters, ending in "…" when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use postcal_core::grid;
    use postcal_core::sink::MemorySink;
    use postcal_core::PostDraft;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip "[...m"
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Launch", 16), "Launch");
        assert_eq!(truncate("exactly sixteen!", 16), "exactly sixteen!");
    }

    #[test]
    fn truncate_cuts_long_text() {
        let cut = truncate("A very long post title indeed", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn month_grid_lists_posts_under_their_day() {
        let mut store = PostStore::open(MemorySink::new());
        store.add(PostDraft::new(
            "Launch",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ));

        let grid = grid::build(2024, 3, Weekday::Sun).unwrap();
        let out = strip_ansi(&month_grid(&grid, &store));

        assert!(out.contains("March 2024"));
        assert!(out.starts_with(' '));
        assert!(out.contains("Sunday"));
        assert!(out.contains("#1 Launch"));

        let day_line = out.lines().position(|l| l.contains("15")).unwrap();
        let post_line = out.lines().position(|l| l.contains("#1 Launch")).unwrap();
        assert_eq!(post_line, day_line + 1);

        // "#1 Launch" sits in the same column as "15"
        let day_col = out.lines().nth(day_line).unwrap().find("15").unwrap();
        let post_col = out.lines().nth(post_line).unwrap().find("#1").unwrap();
        assert_eq!(day_col, post_col);
    }

    #[test]
    fn stats_lists_breakdowns() {
        let mut draft = PostDraft::new("x", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        draft.platforms = vec![Platform::Instagram];
        let posts = vec![Post::from_draft(1, draft)];

        let out = strip_ansi(&stats(&Stats::from_posts(&posts)));
        assert!(out.contains("Total posts: 1"));
        assert!(out.contains("Draft: 1"));
        assert!(out.contains("Instagram: 1"));
    }
}
