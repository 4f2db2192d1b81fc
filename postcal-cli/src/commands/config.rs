use anyhow::Result;
use owo_colors::OwoColorize;
use postcal_core::config::PostcalConfig;
use postcal_core::store::STATE_KEY;

use crate::session::Session;

pub fn run(session: &Session) -> Result<()> {
    let config_path = PostcalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", session.store.sink().path_for(STATE_KEY).display());

    println!();
    println!("{}", "Settings".bold());
    println!("  First day of week:  {}", session.config.first_day_of_week);
    println!("  Posts:              {}", session.store.len());
    println!("  Next id:            {}", session.store.next_id());

    Ok(())
}
