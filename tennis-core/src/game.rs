//! Game session: one game between two named players

use serde::{Deserialize, Serialize};

use crate::error::{Result, TennisError};
use crate::state::{DisplayContext, Players, Role, State, StateId};
use crate::table::StateTable;

// ============================================================================
// SCORER SEAM
// ============================================================================

/// Anything that can be driven by point-won events and render a score
pub trait Scorer {
    /// Record a point for the named player
    fn won_point(&mut self, player_name: &str) -> Result<()>;

    /// Current score in tennis vocabulary
    fn score(&self) -> String;
}

/// Serializable view of a game at one moment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub server: String,
    pub receiver: String,
    pub score: String,
    pub finished: bool,
    pub winner: Option<String>,
    pub points_played: usize,
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// A single game. Transitions come from the shared [`StateTable`]; the game
/// only owns its current state id and the player names.
#[derive(Clone, Debug)]
pub struct Game {
    players: Players,
    table: &'static StateTable,
    current: StateId,
    history: Vec<Role>,
}

impl Game {
    /// Start a game at Love-All. `server` and `receiver` must be non-empty
    /// and distinct.
    pub fn new(server: impl Into<String>, receiver: impl Into<String>) -> Result<Self> {
        let players = Players::new(server, receiver)?;
        let table = StateTable::global()?;
        Ok(Self {
            players,
            table,
            current: table.initial(),
            history: Vec::new(),
        })
    }

    /// Record a point by player name
    pub fn won_point(&mut self, player_name: &str) -> Result<()> {
        let role = self.players.role_of(player_name).ok_or_else(|| {
            tracing::warn!("Rejected point for unknown player {:?}", player_name);
            TennisError::UnknownPlayer(player_name.to_string())
        })?;
        self.won_point_by(role)
    }

    /// Record a point by role. On failure the score is unchanged.
    pub fn won_point_by(&mut self, role: Role) -> Result<()> {
        let next = self.state().won_point(role, &self.players).map_err(|e| {
            tracing::warn!("Rejected point for {:?}: {}", role, e);
            e
        })?;
        tracing::debug!(
            "{:?} won point: {} -> {}",
            role,
            self.state(),
            self.table.get(next)
        );
        self.current = next;
        self.history.push(role);
        Ok(())
    }

    pub fn score(&self) -> String {
        self.state().score(&self.players)
    }

    pub fn state(&self) -> &State {
        self.table.get(self.current)
    }

    pub fn state_id(&self) -> StateId {
        self.current
    }

    pub fn is_over(&self) -> bool {
        self.state().is_terminal()
    }

    /// Name of the winner, once the game is over
    pub fn winner(&self) -> Option<&str> {
        self.state().winner().map(|role| self.players.name(role))
    }

    pub fn server(&self) -> &str {
        self.players.server()
    }

    pub fn receiver(&self) -> &str {
        self.players.receiver()
    }

    /// Roles of the points applied so far, in order
    pub fn history(&self) -> &[Role] {
        &self.history
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            server: self.server().to_string(),
            receiver: self.receiver().to_string(),
            score: self.score(),
            finished: self.is_over(),
            winner: self.winner().map(str::to_string),
            points_played: self.history.len(),
        }
    }
}

impl Scorer for Game {
    fn won_point(&mut self, player_name: &str) -> Result<()> {
        Game::won_point(self, player_name)
    }

    fn score(&self) -> String {
        Game::score(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
