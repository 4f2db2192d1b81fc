use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use postcal_core::month::YearMonth;
use postcal_core::post::{SUGGESTED_CONTENT_TYPES, SUGGESTED_PILLARS};
use postcal_core::PostDraft;

use super::{parse_date, PostFields};
use crate::prompt;
use crate::session::Session;

pub fn run(session: &mut Session, title: Option<String>, fields: PostFields) -> Result<()> {
    let interactive = title.is_none() || fields.date.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => prompt::title(None)?,
    };

    // --- Date ---
    let date = match &fields.date {
        Some(d) => parse_date(d)?,
        None => prompt::date(Local::now().date_naive())?,
    };

    let mut draft = PostDraft::new(title, date);
    fields.apply(&mut draft)?;

    // --- Remaining fields, only those not given as flags ---
    if interactive {
        if fields.link.is_none() {
            draft.link = prompt::optional("Link", None, &[])?;
        }
        if fields.pillar.is_none() {
            draft.content_pillar = prompt::optional("Content pillar", None, SUGGESTED_PILLARS)?;
        }
        if fields.status.is_none() {
            draft.status = prompt::status(draft.status)?;
        }
        if fields.content_type.is_none() {
            draft.content_type =
                prompt::optional("Content type", None, SUGGESTED_CONTENT_TYPES)?;
        }
        if fields.platforms.is_empty() && !fields.no_platforms {
            draft.platforms = prompt::platforms(&draft.platforms)?;
        }
        if fields.notes.is_none() {
            draft.notes = prompt::optional("Notes", None, &[])?;
        }
        if fields.comments.is_none() {
            draft.comments = prompt::optional("Comments", None, &[])?;
        }
        println!();
    }

    draft.validate()?;

    let post = session.store.add(draft);
    session.report_warnings();

    println!("{}", format!("  Created: #{} {}", post.id, post.title).green());
    println!();

    session.render_month(YearMonth::of(post.date))
}
