//! Tennis CLI - Command-line interface
//!
//! Commands:
//! - play: Score a game from points given on the command line
//! - replay: Score a game from a recorded rally file
//! - simulate: Play a random game with a seeded RNG
//! - table: Dump the precomputed state table

mod play_cmd;
mod simulate;
mod table_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use play_cmd::{PlayArgs, ReplayArgs};
use simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Tennis game score keeper")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a game from points given on the command line
    Play(PlayArgs),
    /// Score a game from a recorded rally file
    Replay(ReplayArgs),
    /// Play a random game
    Simulate(SimulateArgs),
    /// Dump every reachable score state
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run_play(args),
        Commands::Replay(args) => play_cmd::run_replay(args),
        Commands::Simulate(args) => simulate::run(args),
        Commands::Table => table_cmd::run(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
