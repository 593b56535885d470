//! Flat scoreboard: raw point counters indexed into a fixed score grid.
//!
//! Same observable behavior as [`Game`](crate::game::Game), realized as a
//! 6x6 lookup. 4-4 folds back to 3-3, so the counters never exceed 5.

use crate::error::{Result, TennisError};
use crate::game::{ScoreSnapshot, Scorer};
use crate::state::{DisplayContext, Players, Role};

/// One cell of the score grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Score(&'static str),
    Advantage(Role),
    Win(Role),
    Unreachable,
}

use Cell::{Advantage, Score, Unreachable as X, Win};

const S: Role = Role::Server;
const R: Role = Role::Receiver;

/// Indexed by `[server points][receiver points]`
#[rustfmt::skip]
const GRID: [[Cell; 6]; 6] = [
    [Score("Love-All"),     Score("Love-Fifteen"),   Score("Love-Thirty"),   Score("Love-Forty"),    Win(R),       X],
    [Score("Fifteen-Love"), Score("Fifteen-All"),    Score("Fifteen-Thirty"), Score("Fifteen-Forty"), Win(R),       X],
    [Score("Thirty-Love"),  Score("Thirty-Fifteen"), Score("Thirty-All"),    Score("Thirty-Forty"),  Win(R),       X],
    [Score("Forty-Love"),   Score("Forty-Fifteen"),  Score("Forty-Thirty"),  Score("Deuce"),         Advantage(R), Win(R)],
    [Win(S),                Win(S),                  Win(S),                 Advantage(S),           X,            X],
    [X,                     X,                       X,                      Win(S),                 X,            X],
];

/// Score keeper backed by the flat grid
#[derive(Clone, Debug)]
pub struct FlatScoreboard {
    players: Players,
    points: [usize; 2],
    points_played: usize,
}

impl FlatScoreboard {
    pub fn new(server: impl Into<String>, receiver: impl Into<String>) -> Result<Self> {
        Ok(Self {
            players: Players::new(server, receiver)?,
            points: [0, 0],
            points_played: 0,
        })
    }

    pub fn won_point(&mut self, player_name: &str) -> Result<()> {
        let role = self
            .players
            .role_of(player_name)
            .ok_or_else(|| TennisError::UnknownPlayer(player_name.to_string()))?;

        if let Win(winner) = self.cell() {
            return Err(TennisError::GameAlreadyWon(
                self.players.name(winner).to_string(),
            ));
        }

        let before = self.points;
        self.points[role as usize] += 1;
        if self.points == [4, 4] {
            self.points = [3, 3];
        }
        if self.cell() == X {
            self.points = before;
            return Err(TennisError::InvalidConfiguration(format!(
                "no score for {:?}",
                self.points
            )));
        }
        self.points_played += 1;
        Ok(())
    }

    pub fn score(&self) -> String {
        match self.cell() {
            Score(text) => text.to_string(),
            Advantage(role) => format!("Advantage {}", self.players.name(role)),
            Win(role) => format!("Win for {}", self.players.name(role)),
            X => String::new(),
        }
    }

    /// Same shape as [`Game::snapshot`](crate::game::Game::snapshot)
    pub fn snapshot(&self) -> ScoreSnapshot {
        let winner = match self.cell() {
            Win(role) => Some(self.players.name(role).to_string()),
            _ => None,
        };
        ScoreSnapshot {
            server: self.players.server().to_string(),
            receiver: self.players.receiver().to_string(),
            score: self.score(),
            finished: winner.is_some(),
            winner,
            points_played: self.points_played,
        }
    }

    fn cell(&self) -> Cell {
        GRID.get(self.points[0])
            .and_then(|row| row.get(self.points[1]))
            .copied()
            .unwrap_or(X)
    }
}

impl Scorer for FlatScoreboard {
    fn won_point(&mut self, player_name: &str) -> Result<()> {
        FlatScoreboard::won_point(self, player_name)
    }

    fn score(&self) -> String {
        FlatScoreboard::score(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_deuce_folds() {
        let mut board = FlatScoreboard::new("A", "B").unwrap();
        for p in ["A", "B", "A", "B", "A", "B", "A", "B"] {
            board.won_point(p).unwrap();
        }
        assert_eq!(board.score(), "Deuce");
        assert_eq!(board.points, [3, 3]);
    }

    #[test]
    fn test_flat_win_is_final() {
        let mut board = FlatScoreboard::new("A", "B").unwrap();
        for _ in 0..4 {
            board.won_point("A").unwrap();
        }
        assert_eq!(board.score(), "Win for A");
        // A receiver point after the win must not be recorded either
        assert_eq!(
            board.won_point("B"),
            Err(TennisError::GameAlreadyWon("A".to_string()))
        );
        assert_eq!(board.score(), "Win for A");
    }

    #[test]
    fn test_flat_advantage_win() {
        let mut board = FlatScoreboard::new("A", "B").unwrap();
        for p in ["A", "A", "A", "B", "B", "B", "B", "B"] {
            board.won_point(p).unwrap();
        }
        assert_eq!(board.score(), "Win for B");
        assert!(board.won_point("C").is_err());
    }

    #[test]
    fn test_flat_snapshot_matches_game() {
        let mut board = FlatScoreboard::new("A", "B").unwrap();
        let mut game = crate::game::Game::new("A", "B").unwrap();
        for p in ["A", "B", "A", "B", "A", "B", "B", "B"] {
            board.won_point(p).unwrap();
            game.won_point(p).unwrap();
            assert_eq!(board.snapshot(), game.snapshot());
        }
        // Rejected points are not counted
        assert!(board.won_point("A").is_err());
        assert_eq!(board.snapshot().points_played, 8);
        assert_eq!(board.snapshot().winner.as_deref(), Some("B"));
    }
}
