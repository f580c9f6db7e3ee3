use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use canary_mirror::app::AppContext;
use canary_mirror::cli::commands::{self, ListOptions};
use canary_mirror::cli::{Cli, Commands, ThemeAction};
use canary_mirror::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns stdout, so logs go to stderr or a file
    match &cli.log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .with(EnvFilter::from_default_env())
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    }

    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.feed_url.as_deref())?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            canary_mirror::tui::run(Arc::new(ctx)).await?;
        }
        Commands::List {
            search,
            from,
            to,
            oldest,
            limit,
            all,
        } => {
            let options = ListOptions {
                search,
                from,
                to,
                oldest,
                limit: (!all).then_some(limit),
            };
            commands::list_releases(&ctx, options).await?;
        }
        Commands::Theme { action } => {
            commands::theme(&ctx, action.unwrap_or(ThemeAction::Show))?;
        }
    }

    Ok(())
}
