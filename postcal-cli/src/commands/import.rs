use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use postcal_core::month::YearMonth;

use crate::session::Session;

pub fn run(session: &mut Session, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let report = session
        .store
        .import_many(&raw)
        .with_context(|| format!("Could not import {}", path.display()))?;
    session.report_warnings();

    let count = report.imported.len();
    println!(
        "{}",
        format!(
            "  Imported {} {}",
            count,
            if count == 1 { "post" } else { "posts" }
        )
        .green()
    );

    if let Some(rejection) = report.rejection() {
        eprintln!("{} {}", "Warning:".yellow().bold(), rejection.to_string().yellow());
        eprintln!("{}", "  Run with -v to see why each record was skipped".dimmed());
    }
    println!();

    let shown = report
        .imported
        .first()
        .map_or_else(YearMonth::current, |post| YearMonth::of(post.date));
    session.render_month(shown)
}
