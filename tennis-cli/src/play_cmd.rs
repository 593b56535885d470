//! Play and replay commands - score a game point by point
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_play(), run_replay() - orchestration
//! - Level 2: score_rally()
//! - Level 3: report()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tennis_core::{FlatScoreboard, Game, Rally, RallyStep, ScoreSnapshot};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Name of the serving player
    #[arg(long)]
    pub server: String,

    /// Name of the receiving player
    #[arg(long)]
    pub receiver: String,

    /// Point winners, in order
    #[arg(value_name = "PLAYER")]
    pub points: Vec<String>,

    /// Use the flat score grid instead of the state table
    #[arg(long)]
    pub flat: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Rally JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Use the flat score grid instead of the state table
    #[arg(long)]
    pub flat: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run_play(args: PlayArgs) -> Result<()> {
    let rally = Rally::new(args.server, args.receiver, args.points);
    let (steps, snapshot) = score_rally(&rally, args.flat)?;
    report(&steps, &snapshot, args.json)
}

/// Run replay command
pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let rally = Rally::load(&args.file)?;
    tracing::info!(
        "Loaded rally from {}: {} points",
        args.file.display(),
        rally.points.len()
    );
    let (steps, snapshot) = score_rally(&rally, args.flat)?;
    report(&steps, &snapshot, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply every point of the rally on the chosen scorer
fn score_rally(rally: &Rally, flat: bool) -> Result<(Vec<RallyStep>, ScoreSnapshot)> {
    tracing::info!(
        "Scoring {} vs {} ({} points, {})",
        rally.server,
        rally.receiver,
        rally.points.len(),
        if flat { "flat grid" } else { "state table" }
    );

    if flat {
        let mut board = FlatScoreboard::new(rally.server.as_str(), rally.receiver.as_str())
            .context("Invalid players")?;
        let steps = rally.replay_on(&mut board)?;
        Ok((steps, board.snapshot()))
    } else {
        let mut game = Game::new(rally.server.as_str(), rally.receiver.as_str())
            .context("Invalid players")?;
        let steps = rally.replay_on(&mut game)?;
        Ok((steps, game.snapshot()))
    }
}

// ============================================================================
// LEVEL 3 - REPORTING
// ============================================================================

fn report(steps: &[RallyStep], snapshot: &ScoreSnapshot, json: bool) -> Result<()> {
    for step in steps {
        print_step(step);
    }
    println!("Score: {}", snapshot.score);
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

pub fn print_step(step: &RallyStep) {
    println!("{:>3}. {:<12} {}", step.point, step.player, step.score);
}
