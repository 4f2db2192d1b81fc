use anyhow::Result;
use postcal_core::month::YearMonth;

use crate::session::Session;

pub fn run(session: &Session, month: Option<String>, next: u32, prev: u32) -> Result<()> {
    let start = match month {
        Some(m) => m.parse::<YearMonth>()?,
        None => YearMonth::current(),
    };

    let shown = start.shift(i64::from(next) - i64::from(prev));

    session.render_month(shown)
}
