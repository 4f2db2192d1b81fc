//! Loaded configuration plus the open post store for one CLI invocation.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use postcal_core::config::PostcalConfig;
use postcal_core::grid;
use postcal_core::month::YearMonth;
use postcal_core::sink::FileSink;
use postcal_core::PostStore;

use crate::render;

pub struct Session {
    pub config: PostcalConfig,
    pub store: PostStore<FileSink>,
}

impl Session {
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = PostcalConfig::load()?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        let data_path = config.data_path();
        log::info!("Opening posts in {}", data_path.display());
        let store = PostStore::open(FileSink::new(data_path));

        let mut session = Session { config, store };
        session.report_warnings();
        Ok(session)
    }

    /// Print any persistence problems the store ran into. These never stop
    /// the command.
    pub fn report_warnings(&mut self) {
        for warning in self.store.take_warnings() {
            eprintln!("{} {}", "Warning:".yellow().bold(), warning.to_string().yellow());
        }
    }

    /// Print the month grid for `month` with its posts.
    pub fn render_month(&self, month: YearMonth) -> Result<()> {
        let grid = grid::build(month.year(), month.month(), self.config.first_day_of_week)?;
        println!("{}", render::month_grid(&grid, &self.store));
        Ok(())
    }
}
