mod calendar;
mod cli;
mod config;
mod models;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::{AppConfig, Session};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;
    let session = Session::resolve(&config, cli.birthday, cli.years, cli.today);
    log::debug!("Session: {:?}", session);

    match cli.command {
        Some(Commands::Birthday { date }) => {
            let path = AppConfig::config_path()?;
            handlers::handle_birthday(&mut config, &path, date, session.today())?;
        }
        Some(Commands::Years { years }) => {
            let path = AppConfig::config_path()?;
            handlers::handle_years(&mut config, &path, years)?;
        }
        Some(Commands::Grid { transpose }) => {
            handlers::handle_grid(&session, &config.display, transpose)?;
        }
        Some(Commands::Week { number }) => {
            handlers::handle_week(&session, number)?;
        }
        Some(Commands::Stats) => {
            handlers::handle_stats(&session)?;
        }
        Some(Commands::Export) => {
            handlers::handle_export(&session)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(config, session)?;
        }
    }

    Ok(())
}
