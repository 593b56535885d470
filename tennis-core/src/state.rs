//! Score states and their transitions
//!
//! A [`State`] never stores player names. Names come from a
//! [`DisplayContext`] passed in at render/transition time, so one table of
//! states serves every game in the process.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TennisError};

// ============================================================================
// ROLES AND DISPLAY CONTEXT
// ============================================================================

/// Player role within a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Server = 0,
    Receiver = 1,
}

impl Role {
    pub fn opponent(self) -> Self {
        match self {
            Role::Server => Role::Receiver,
            Role::Receiver => Role::Server,
        }
    }
}

/// Supplies the player names a state needs for rendering
pub trait DisplayContext {
    /// Name of the server
    fn server(&self) -> &str;

    /// Name of the receiver
    fn receiver(&self) -> &str;

    fn name(&self, role: Role) -> &str {
        match role {
            Role::Server => self.server(),
            Role::Receiver => self.receiver(),
        }
    }
}

/// The two player names of a game, fixed at construction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    server: String,
    receiver: String,
}

impl Players {
    /// Names must be non-empty and distinct
    pub fn new(server: impl Into<String>, receiver: impl Into<String>) -> Result<Self> {
        let server = server.into();
        let receiver = receiver.into();
        if server.is_empty() || receiver.is_empty() {
            return Err(TennisError::InvalidConfiguration(
                "player names must not be empty".to_string(),
            ));
        }
        if server == receiver {
            return Err(TennisError::InvalidConfiguration(format!(
                "player names must be distinct but were: {}",
                server
            )));
        }
        Ok(Self { server, receiver })
    }

    /// Resolve a name to its role by exact match
    pub fn role_of(&self, name: &str) -> Option<Role> {
        if name == self.server {
            Some(Role::Server)
        } else if name == self.receiver {
            Some(Role::Receiver)
        } else {
            None
        }
    }
}

impl DisplayContext for Players {
    fn server(&self) -> &str {
        &self.server
    }

    fn receiver(&self) -> &str {
        &self.receiver
    }
}

// ============================================================================
// STATES
// ============================================================================

/// Index of a state inside its [`StateTable`](crate::table::StateTable)
///
/// Ids are only handed out by the table and its constants, so every id
/// resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u8);

impl StateId {
    pub const DEUCE: StateId = StateId(0);
    pub const ADVANTAGE_SERVER: StateId = StateId(1);
    pub const ADVANTAGE_RECEIVER: StateId = StateId(2);
    pub const WIN_SERVER: StateId = StateId(3);
    pub const WIN_RECEIVER: StateId = StateId(4);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn advantage(role: Role) -> Self {
        match role {
            Role::Server => Self::ADVANTAGE_SERVER,
            Role::Receiver => Self::ADVANTAGE_RECEIVER,
        }
    }

    pub fn win(role: Role) -> Self {
        match role {
            Role::Server => Self::WIN_SERVER,
            Role::Receiver => Self::WIN_RECEIVER,
        }
    }
}

/// One point in a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Both below 4 points, scores differ
    Generic {
        server: u8,
        receiver: u8,
        server_wins: StateId,
        receiver_wins: StateId,
    },
    /// Tied below deuce
    All {
        points: u8,
        server_wins: StateId,
        receiver_wins: StateId,
    },
    Deuce,
    Advantage(Role),
    Win(Role),
}

impl State {
    /// Successor when `role` wins the point. Fails once the game is won.
    pub fn won_point(&self, role: Role, ctx: &dyn DisplayContext) -> Result<StateId> {
        match *self {
            State::Generic { server_wins, receiver_wins, .. }
            | State::All { server_wins, receiver_wins, .. } => Ok(match role {
                Role::Server => server_wins,
                Role::Receiver => receiver_wins,
            }),
            State::Deuce => Ok(StateId::advantage(role)),
            State::Advantage(leader) if leader == role => Ok(StateId::win(role)),
            State::Advantage(_) => Ok(StateId::DEUCE),
            State::Win(winner) => Err(TennisError::GameAlreadyWon(ctx.name(winner).to_string())),
        }
    }

    pub fn server_won_point(&self, ctx: &dyn DisplayContext) -> Result<StateId> {
        self.won_point(Role::Server, ctx)
    }

    pub fn receiver_won_point(&self, ctx: &dyn DisplayContext) -> Result<StateId> {
        self.won_point(Role::Receiver, ctx)
    }

    /// Render the score for display
    pub fn score(&self, ctx: &dyn DisplayContext) -> String {
        match *self {
            State::Generic { server, receiver, .. } => {
                format!("{}-{}", translate(server), translate(receiver))
            }
            State::All { points, .. } => format!("{}-All", translate(points)),
            State::Deuce => "Deuce".to_string(),
            State::Advantage(role) => format!("Advantage {}", ctx.name(role)),
            State::Win(role) => format!("Win for {}", ctx.name(role)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Win(_))
    }

    pub fn winner(&self) -> Option<Role> {
        match *self {
            State::Win(role) => Some(role),
            _ => None,
        }
    }
}

/// Role-based label, independent of any player names
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            State::Generic { server, receiver, .. } => {
                write!(f, "{}-{}", translate(server), translate(receiver))
            }
            State::All { points, .. } => write!(f, "{}-All", translate(points)),
            State::Deuce => write!(f, "Deuce"),
            State::Advantage(Role::Server) => write!(f, "Advantage server"),
            State::Advantage(Role::Receiver) => write!(f, "Advantage receiver"),
            State::Win(Role::Server) => write!(f, "Win for server"),
            State::Win(Role::Receiver) => write!(f, "Win for receiver"),
        }
    }
}

/// Tennis name for a point count below 4
fn translate(points: u8) -> &'static str {
    match points {
        0 => "Love",
        1 => "Fifteen",
        2 => "Thirty",
        // Generic/All never hold more than 3
        _ => "Forty",
    }
}
