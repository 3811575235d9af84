//! Strictly Duel - terminal tic-tac-toe for two players on a network.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PeerArgs};
use std::path::Path;
use strictly_duel::{DuelConfig, DuelError, Role, SessionReport, TuiFrontend};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (role, args) = match cli.command {
        Command::Host(args) => (Role::Host, args),
        Command::Guest(args) => (Role::Guest, args),
    };

    let mut config =
        DuelConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config = apply_overrides(config, args);
    if let Some(log_file) = cli.log_file {
        config = config.with_log_file(log_file);
    }

    init_tracing(config.log_file())?;
    info!(%role, endpoint = %config.endpoint(), "Starting Strictly Duel");

    let result = run(role, &config).await;
    match result {
        Ok(report) => {
            print_summary(&report);
            Ok(())
        }
        Err(DuelError::Cancelled) => {
            info!("Session cancelled by user");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Session failed");
            Err(e).context("Session ended with an error")
        }
    }
}

/// Runs one side with the terminal UI, restoring the terminal before returning.
#[instrument(skip(config))]
async fn run(role: Role, config: &DuelConfig) -> Result<SessionReport, DuelError> {
    let mut frontend = TuiFrontend::start()?;
    let result = match role {
        Role::Host => strictly_duel::run_host(config, &mut frontend).await,
        Role::Guest => strictly_duel::run_guest(config, &mut frontend).await,
    };
    strictly_duel::hold_failure(&mut frontend, &result).await;
    result
}

fn apply_overrides(mut config: DuelConfig, args: PeerArgs) -> DuelConfig {
    if let Some(address) = args.address {
        config = config.with_address(address);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(name) = args.name {
        config = config.with_username(name);
    }
    config
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_duel=debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn print_summary(report: &SessionReport) {
    let name = |name: Option<&strictly_duel::Username>| {
        name.map_or_else(|| "?".to_string(), ToString::to_string)
    };
    let stats = report.statistics();
    println!("Game Statistics");
    println!(
        "  {} (host) vs {} (guest)",
        name(report.host_name()),
        name(report.guest_name())
    );
    println!(
        "  games: {}  wins: {}  losses: {}  ties: {}",
        stats.games_played(),
        stats.wins(),
        stats.losses(),
        stats.ties()
    );
}
