//! Error types for scoring operations

/// Errors raised by the scoring machine and game sessions
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TennisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown player name: {0}")]
    UnknownPlayer(String),

    #[error("Game is already won by {0}")]
    GameAlreadyWon(String),
}

pub type Result<T> = std::result::Result<T, TennisError>;
