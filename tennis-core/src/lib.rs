//! Tennis Core - Game scoring engine
//!
//! This crate provides the scoring logic for a single tennis game:
//! - Score lookup keys
//! - Stateless score states and their transitions
//! - Precomputed, process-wide state table
//! - Game sessions bound to two player names
//! - Flat grid scoreboard as an alternate realization
//! - Recorded rallies (JSON)

pub mod error;
pub mod key;
pub mod state;
pub mod table;
pub mod game;
pub mod flat;
pub mod rally;

// Re-exports for convenient access
pub use error::{Result, TennisError};
pub use key::{ScoreKey, MAX_KEY_POINTS};
pub use state::{DisplayContext, Players, Role, State, StateId};
pub use table::StateTable;
pub use game::{Game, ScoreSnapshot, Scorer};
pub use flat::FlatScoreboard;
pub use rally::{Rally, RallyStep};
