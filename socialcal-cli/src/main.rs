mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use socialcal_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

use commands::SessionArgs;

#[derive(Parser)]
#[command(name = "socialcal")]
#[command(about = "Browse your events and public feeds, and export them to .ics")]
struct Cli {
    /// Use this config file instead of ~/.config/socialcal/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your events, recurring ones expanded through the end of the year
    Events {
        #[command(flatten)]
        session: SessionArgs,

        /// Include public events from followed feeds
        #[arg(long)]
        with_feeds: bool,
    },
    /// Show events from the feeds you follow
    Feeds {
        /// Hide this feed (repeatable)
        #[arg(long)]
        unfollow: Vec<String>,
    },
    /// Like or unlike a public event
    Like {
        id: String,
    },
    /// Write the filtered events to an .ics file
    Export {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(short, long, default_value = "calendar.ics")]
        output: PathBuf,
    },
    /// Show statistics for the filtered events
    Stats {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// List your personal calendars
    Calendars {
        /// Add a calendar with this name
        #[arg(long)]
        add: Option<String>,

        /// Remove every calendar with this name
        #[arg(long, conflicts_with = "add")]
        remove: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };

    match cli.command {
        Commands::Events { session, with_feeds } => {
            let session = session.build(&config).await?;
            commands::events::run(&session, with_feeds)
        }
        Commands::Feeds { unfollow } => commands::feeds::run(&config, &unfollow),
        Commands::Like { id } => commands::like::run(&config, &id),
        Commands::Export { session, output } => {
            let session = session.build(&config).await?;
            commands::export::run(&session, &output).await
        }
        Commands::Stats { session } => {
            let session = session.build(&config).await?;
            commands::stats::run(&session)
        }
        Commands::Calendars { add, remove } => {
            commands::calendars::run(&mut config, &config_path, add.as_deref(), remove.as_deref())
        }
    }
}

/// An explicit `--config` path must exist; the default one is created on
/// first run.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            AppConfig::load_from(path)?
        }
        None => AppConfig::load()?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_every_subcommand_has_help() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            assert!(sub.get_about().is_some(), "{} has no description", sub.get_name());
        }
    }
}
