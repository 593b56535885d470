//! Rally - a recorded sequence of points for one game

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::game::{Game, Scorer};

/// Players plus the names of the point winners, in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rally {
    pub server: String,
    pub receiver: String,
    #[serde(default)]
    pub points: Vec<String>,
}

/// Score after one applied point
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyStep {
    pub point: usize,
    pub player: String,
    pub score: String,
}

impl Rally {
    pub fn new(server: impl Into<String>, receiver: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            server: server.into(),
            receiver: receiver.into(),
            points,
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rally file: {}", path.display()))?;
        let rally: Rally = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse rally file: {}", path.display()))?;
        Ok(rally)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Play every point on a fresh state-machine game
    pub fn replay(&self) -> anyhow::Result<(Game, Vec<RallyStep>)> {
        let mut game = Game::new(self.server.as_str(), self.receiver.as_str())?;
        let steps = self.replay_on(&mut game)?;
        Ok((game, steps))
    }

    /// Play every point on the given scorer, stopping at the first rejected point
    pub fn replay_on<S: Scorer>(&self, scorer: &mut S) -> anyhow::Result<Vec<RallyStep>> {
        let mut steps = Vec::with_capacity(self.points.len());
        for (i, player) in self.points.iter().enumerate() {
            scorer
                .won_point(player)
                .with_context(|| format!("Point {} ({}) rejected", i + 1, player))?;
            steps.push(RallyStep {
                point: i + 1,
                player: player.clone(),
                score: scorer.score(),
            });
        }
        Ok(steps)
    }
}
