use anyhow::Result;
use postcal_core::stats::Stats;

use crate::render;
use crate::session::Session;

pub fn run(session: &Session) -> Result<()> {
    let stats = Stats::from_posts(session.store.all());
    println!("{}", render::stats(&stats));
    Ok(())
}
