pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "canary-mirror")]
#[command(about = "Browse Xenia Canary builds from the terminal", long_about = None)]
pub struct Cli {
    /// Release feed URL (overrides the config file)
    #[arg(long, global = true)]
    pub feed_url: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print releases matching the filters
    List {
        /// Case-insensitive match on tag or title
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only releases published on or after this day (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        from: String,

        /// Only releases published on or before this day (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        to: String,

        /// Oldest first instead of newest first
        #[arg(long)]
        oldest: bool,

        /// Number of releases to print
        #[arg(
            short = 'n',
            long,
            default_value_t = crate::pipeline::BATCH_SIZE,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,

        /// Print every matching release
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Show or change the saved theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ThemeAction {
    /// Print the saved theme
    Show,
    /// Switch between dark and light
    Toggle,
}
