use anyhow::Result;
use owo_colors::OwoColorize;
use postcal_core::month::YearMonth;
use postcal_core::post::{SUGGESTED_CONTENT_TYPES, SUGGESTED_PILLARS};
use postcal_core::{PostDraft, PostcalError};

use super::PostFields;
use crate::prompt;
use crate::session::Session;

pub fn run(session: &mut Session, id: u64, title: Option<String>, fields: PostFields) -> Result<()> {
    let existing = session
        .store
        .get(id)
        .ok_or(PostcalError::NotFound(id))?
        .to_draft();

    let draft = if title.is_none() && fields.is_empty() {
        prompt_all(existing)?
    } else {
        let mut draft = existing;
        if let Some(title) = title {
            draft.title = title;
        }
        fields.apply(&mut draft)?;
        draft
    };

    draft.validate()?;

    let post = session.store.update(id, draft)?;
    session.report_warnings();

    println!("{}", format!("  Updated: #{} {}", post.id, post.title).yellow());
    println!();

    session.render_month(YearMonth::of(post.date))
}

/// Walk through every field with the current value as the default.
fn prompt_all(mut draft: PostDraft) -> Result<PostDraft> {
    draft.title = prompt::title(Some(&draft.title))?;
    draft.date = prompt::date(draft.date)?;
    draft.link = prompt::optional("Link", draft.link.as_deref(), &[])?;
    draft.content_pillar = prompt::optional(
        "Content pillar",
        draft.content_pillar.as_deref(),
        SUGGESTED_PILLARS,
    )?;
    draft.status = prompt::status(draft.status)?;
    draft.content_type = prompt::optional(
        "Content type",
        draft.content_type.as_deref(),
        SUGGESTED_CONTENT_TYPES,
    )?;
    draft.platforms = prompt::platforms(&draft.platforms)?;
    draft.notes = prompt::optional("Notes", draft.notes.as_deref(), &[])?;
    draft.comments = prompt::optional("Comments", draft.comments.as_deref(), &[])?;
    println!();

    Ok(draft)
}
