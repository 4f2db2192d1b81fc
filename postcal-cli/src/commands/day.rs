use anyhow::Result;
use owo_colors::OwoColorize;

use super::parse_date;
use crate::render;
use crate::session::Session;

pub fn run(session: &Session, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let posts = session.store.list_for_date(date);

    println!("{}", date.format("%A, %B %-d %Y").to_string().bold());

    if posts.is_empty() {
        println!("{}", "  No posts".dimmed());
        return Ok(());
    }

    for post in posts {
        println!();
        println!("{}", render::post_details(post));
    }

    Ok(())
}
