mod commands;
mod prompt;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::PostFields;
use session::Session;

#[derive(Parser)]
#[command(name = "postcal")]
#[command(about = "Plan social media posts on a month calendar")]
#[command(version)]
struct Cli {
    /// Directory the posts are saved in (overrides the config file)
    #[arg(long, global = true, env = "POSTCAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month with its posts (defaults to the current month)
    Month {
        /// Month to show (YYYY-MM)
        month: Option<String>,

        /// Move forward this many months
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=120_000))]
        next: u32,

        /// Move back this many months
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=120_000))]
        prev: u32,
    },
    /// List every post on a date
    Day {
        /// YYYY-MM-DD, "today" or "tomorrow"
        date: String,
    },
    /// Create a post (prompts for anything missing)
    New {
        title: Option<String>,

        #[command(flatten)]
        fields: PostFields,
    },
    /// Edit a post (prompts for every field when no flags are given)
    Edit {
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete a post
    Delete {
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Delete every post and restart ids at 1
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Write all posts to a JSON backup
    Export {
        /// Output file, or "-" for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add posts from a JSON backup (ids are reassigned)
    Import { path: PathBuf },
    /// Post counts by status and platform
    Stats,
    /// Show config paths and settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut session = Session::open(cli.data_dir)?;

    match cli.command.unwrap_or(Commands::Month {
        month: None,
        next: 0,
        prev: 0,
    }) {
        Commands::Month { month, next, prev } => commands::month::run(&session, month, next, prev),
        Commands::Day { date } => commands::day::run(&session, &date),
        Commands::New { title, fields } => commands::new::run(&mut session, title, fields),
        Commands::Edit { id, title, fields } => {
            commands::edit::run(&mut session, id, title, fields)
        }
        Commands::Delete { id, force } => commands::delete::run(&mut session, id, force),
        Commands::Clear { force } => commands::clear::run(&mut session, force),
        Commands::Export { output } => commands::export::run(&session, output),
        Commands::Import { path } => commands::import::run(&mut session, &path),
        Commands::Stats => commands::stats::run(&session),
        Commands::Config => commands::config::run(&session),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_new_with_flags() {
        let cli = Cli::try_parse_from([
            "postcal",
            "new",
            "Launch",
            "--date",
            "2024-03-15",
            "-P",
            "Instagram",
            "-P",
            "Twitter",
            "--status",
            "Scheduled",
        ])
        .unwrap();

        let Some(Commands::New { title, fields }) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(title.as_deref(), Some("Launch"));
        assert_eq!(fields.date.as_deref(), Some("2024-03-15"));
        assert_eq!(fields.platforms, vec!["Instagram", "Twitter"]);
        assert_eq!(fields.status.as_deref(), Some("Scheduled"));
    }

    #[test]
    fn platform_flags_conflict_with_no_platforms() {
        let result = Cli::try_parse_from([
            "postcal",
            "edit",
            "3",
            "-P",
            "Instagram",
            "--no-platforms",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn month_steps_are_bounded() {
        let cli = Cli::try_parse_from(["postcal", "month", "--next", "120000", "--prev", "3"])
            .unwrap();
        let Some(Commands::Month { next, prev, .. }) = cli.command else {
            panic!("expected month");
        };
        assert_eq!((next, prev), (120_000, 3));

        assert!(Cli::try_parse_from(["postcal", "month", "--next", "120001"]).is_err());
        assert!(Cli::try_parse_from(["postcal", "month", "--prev", "2147483649"]).is_err());
    }

    #[test]
    fn no_subcommand_defaults_to_month() {
        let cli = Cli::try_parse_from(["postcal"]).unwrap();
        assert!(cli.command.is_none());
    }
}
