//! Interactive field prompts for the post form.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, MultiSelect, Select};
use owo_colors::OwoColorize;
use postcal_core::{Platform, PostStatus};

use crate::commands::{non_empty, parse_date};

pub fn title(current: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt("  Title *");
    if let Some(current) = current {
        input = input.default(current.to_string());
    }

    let title = input
        .validate_with(|s: &String| -> Result<(), &str> {
            if s.trim().is_empty() {
                Err("A title is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(title.trim().to_string())
}

/// Prompt for a date, retrying until it parses.
pub fn date(current: NaiveDate) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Date *")
            .default(current.format("%Y-%m-%d").to_string())
            .interact_text()?;

        match parse_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Free-text optional field. Suggestions are shown in the prompt only.
pub fn optional(label: &str, current: Option<&str>, suggestions: &[&str]) -> Result<Option<String>> {
    let prompt = if suggestions.is_empty() {
        format!("  {label} (skip)")
    } else {
        format!("  {label} ({}, skip)", suggestions.join(", "))
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .default(current.unwrap_or_default().to_string())
        .show_default(current.is_some())
        .allow_empty(true)
        .interact_text()?;

    Ok(non_empty(&input))
}

pub fn status(current: PostStatus) -> Result<PostStatus> {
    let labels: Vec<&str> = PostStatus::ALL.iter().map(PostStatus::label).collect();
    let default = PostStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);

    let index = Select::new()
        .with_prompt("  Status")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(PostStatus::ALL[index])
}

pub fn platforms(current: &[Platform]) -> Result<Vec<Platform>> {
    let labels: Vec<String> = Platform::ALL
        .iter()
        .map(|p| format!("{} {}", p.icon(), p.label()))
        .collect();
    let selected: Vec<bool> = Platform::ALL.iter().map(|p| current.contains(p)).collect();

    let picked = MultiSelect::new()
        .with_prompt("  Platforms (space to toggle)")
        .items(&labels)
        .defaults(&selected)
        .interact()?;

    // Keep the order of already-chosen platforms, then append new picks
    let mut platforms: Vec<Platform> = current
        .iter()
        .copied()
        .filter(|p| picked.iter().any(|&i| Platform::ALL[i] == *p))
        .collect();
    for i in picked {
        let platform = Platform::ALL[i];
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }

    Ok(platforms)
}
