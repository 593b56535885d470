//! Simulate command - play a random game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: simulate_game()
//! - Level 3: (delegated to tennis-core Game)
//! - Level 4: configuration

use anyhow::{ensure, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tennis_core::{Game, RallyStep, Role};

use crate::play_cmd::print_step;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Name of the serving player
    #[arg(long, default_value = "Server")]
    pub server: String,

    /// Name of the receiving player
    #[arg(long, default_value = "Receiver")]
    pub receiver: String,

    /// Probability that the server wins any given point
    #[arg(long, default_value = "0.6")]
    pub server_win_rate: f64,

    /// Maximum points before giving up
    #[arg(long, default_value = "1000")]
    pub max_points: usize,

    /// Random seed (omit for a random game)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Simulation parameters
#[derive(Clone, Debug)]
pub struct SimulateConfig {
    pub server_win_rate: f64,
    pub max_points: usize,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            server_win_rate: 0.6,
            max_points: 1000,
            seed: None,
        }
    }
}

impl SimulateConfig {
    pub fn with_server_win_rate(mut self, rate: f64) -> Self {
        self.server_win_rate = rate;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.server_win_rate),
            "server win rate must be within 0.0..=1.0, got {}",
            self.server_win_rate
        );
        ensure!(self.max_points > 0, "max points must be positive");
        Ok(())
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs) -> Result<()> {
    let mut config = SimulateConfig::default()
        .with_server_win_rate(args.server_win_rate)
        .with_max_points(args.max_points);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    tracing::info!(
        "Simulating {} vs {} (server win rate {:.2}, seed {:?})",
        args.server,
        args.receiver,
        config.server_win_rate,
        config.seed
    );

    let mut game = Game::new(args.server, args.receiver)?;
    let steps = simulate_game(&mut game, &config)?;
    for step in &steps {
        print_step(step);
    }
    println!("Score: {}", game.score());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Award random points until the game is won or the point cap is reached
pub fn simulate_game(game: &mut Game, config: &SimulateConfig) -> Result<Vec<RallyStep>> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut steps = Vec::new();
    while !game.is_over() && steps.len() < config.max_points {
        let role = if rng.gen_bool(config.server_win_rate) {
            Role::Server
        } else {
            Role::Receiver
        };
        game.won_point_by(role)?;
        let player = match role {
            Role::Server => game.server(),
            Role::Receiver => game.receiver(),
        };
        steps.push(RallyStep {
            point: steps.len() + 1,
            player: player.to_string(),
            score: game.score(),
        });
    }

    if !game.is_over() {
        tracing::warn!("No winner after {} points", steps.len());
    }
    Ok(steps)
}
