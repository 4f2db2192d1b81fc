use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;

use crate::session::Session;

pub fn run(session: &Session, output: Option<PathBuf>) -> Result<()> {
    let json = session.store.export_all()?;

    let path = output.unwrap_or_else(default_backup_name);

    if path.as_os_str() == "-" {
        println!("{json}");
        return Ok(());
    }

    std::fs::write(&path, &json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let count = session.store.len();
    println!(
        "{}",
        format!(
            "  Exported {} {} to {}",
            count,
            if count == 1 { "post" } else { "posts" },
            path.display()
        )
        .green()
    );

    Ok(())
}

/// calendar_backup_YYYYMMDD_HHMMSS.json in the current directory
fn default_backup_name() -> PathBuf {
    PathBuf::from(format!(
        "calendar_backup_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
