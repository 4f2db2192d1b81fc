use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use postcal_core::month::YearMonth;

use crate::session::Session;

pub fn run(session: &mut Session, force: bool) -> Result<()> {
    let count = session.store.len();

    // An empty store still gets cleared so the id counter restarts at 1
    if count > 0 && !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete ALL {} {}?",
                count,
                if count == 1 { "post" } else { "posts" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    session.store.clear_all();
    session.report_warnings();

    if count == 0 {
        println!("{}", "  No posts to clear, ids restart at 1".dimmed());
    } else {
        println!("{}", format!("  Cleared {count} posts").red());
    }
    println!();

    session.render_month(YearMonth::current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use postcal_core::config::PostcalConfig;
    use postcal_core::sink::FileSink;
    use postcal_core::{PostDraft, PostStore};

    fn session_in(dir: &std::path::Path) -> Session {
        Session {
            config: PostcalConfig::default(),
            store: PostStore::open(FileSink::new(dir)),
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft::new(title, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn clearing_emptied_store_restarts_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.store.add(draft("First"));
        session.store.add(draft("Second"));
        session.store.delete(1).unwrap();
        session.store.delete(2).unwrap();

        run(&mut session, true).unwrap();

        assert_eq!(session.store.next_id(), 1);
        assert_eq!(session_in(dir.path()).store.next_id(), 1);
    }

    #[test]
    fn forced_clear_removes_posts() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.store.add(draft("First"));

        run(&mut session, true).unwrap();

        assert!(session.store.is_empty());
        assert_eq!(session.store.add(draft("Again")).id, 1);
    }
}
