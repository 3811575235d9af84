//! Command-line interface for strictly_duel.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Duel - two-player tic-tac-toe over TCP
#[derive(Parser, Debug)]
#[command(name = "strictly_duel")]
#[command(about = "Play tic-tac-toe against someone on another terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (defaults to strictly_duel.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file (overrides the config file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Side to play
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dial a waiting guest; plays X and moves first
    Host(PeerArgs),

    /// Wait for the host to connect; plays O
    Guest(PeerArgs),
}

/// Connection flags shared by both sides.
#[derive(Args, Debug, Clone)]
pub struct PeerArgs {
    /// Address to dial (host) or bind (guest)
    #[arg(short, long)]
    pub address: Option<String>,

    /// TCP port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Username; prompted for when absent
    #[arg(short, long)]
    pub name: Option<String>,
}
