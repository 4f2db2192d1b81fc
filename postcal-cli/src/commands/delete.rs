use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use postcal_core::month::YearMonth;
use postcal_core::PostcalError;

use crate::render;
use crate::session::Session;

pub fn run(session: &mut Session, id: u64, force: bool) -> Result<()> {
    let post = session.store.get(id).ok_or(PostcalError::NotFound(id))?;

    if !force {
        println!("{}", render::post_details(post));
        println!();

        let confirmed = Confirm::new()
            .with_prompt("Delete this post?")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let removed = session.store.delete(id)?;
    session.report_warnings();

    println!("{}", format!("  Deleted: #{} {}", removed.id, removed.title).red());
    println!();

    session.render_month(YearMonth::of(removed.date))
}
