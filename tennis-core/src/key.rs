//! Score lookup keys for the state table

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TennisError};

/// Highest point count a key can hold (advantage / win rows)
pub const MAX_KEY_POINTS: u8 = 4;

/// Raw (server, receiver) point pair used to address states while the table
/// is being built.
///
/// (3,3) and (4,4) are distinct keys; the builder registers both against the
/// one Deuce state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKey {
    server: u8,
    receiver: u8,
}

impl ScoreKey {
    /// Create a key, rejecting components outside `0..=4`
    pub fn new(server: u8, receiver: u8) -> Result<Self> {
        if server > MAX_KEY_POINTS {
            return Err(TennisError::InvalidConfiguration(format!(
                "invalid server score: {}",
                server
            )));
        }
        if receiver > MAX_KEY_POINTS {
            return Err(TennisError::InvalidConfiguration(format!(
                "invalid receiver score: {}",
                receiver
            )));
        }
        Ok(Self { server, receiver })
    }

    pub fn server(&self) -> u8 {
        self.server
    }

    pub fn receiver(&self) -> u8 {
        self.receiver
    }

    pub fn increment_server(&self) -> Result<Self> {
        Self::new(self.server + 1, self.receiver)
    }

    pub fn increment_receiver(&self) -> Result<Self> {
        Self::new(self.server, self.receiver + 1)
    }

    /// Swap server and receiver points
    pub fn flip(&self) -> Self {
        Self {
            server: self.receiver,
            receiver: self.server,
        }
    }

    /// Packed hash value. Both components fit in 3 bits, so the lower 6 bits
    /// are unique for every valid key.
    pub fn packed(&self) -> u8 {
        self.server.rotate_left(3) ^ self.receiver
    }
}

impl Hash for ScoreKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.packed());
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.server, self.receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_packed_hash_unique() {
        let mut hashes = FxHashSet::default();
        for i in 0..=MAX_KEY_POINTS {
            for j in 0..=MAX_KEY_POINTS {
                let key = ScoreKey::new(i, j).unwrap();
                assert!(hashes.insert(key.packed()), "collision at {}", key);
            }
        }
        assert_eq!(hashes.len(), 25);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            ScoreKey::new(5, 0),
            Err(TennisError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ScoreKey::new(0, 5),
            Err(TennisError::InvalidConfiguration(_))
        ));
        assert!(ScoreKey::new(4, 4).is_ok());
    }

    #[test]
    fn test_increment_past_cap_fails() {
        let key = ScoreKey::new(4, 2).unwrap();
        assert!(key.increment_server().is_err());
        assert_eq!(key.increment_receiver().unwrap(), ScoreKey::new(4, 3).unwrap());
    }

    #[test]
    fn test_flip() {
        let key = ScoreKey::new(3, 1).unwrap();
        assert_eq!(key.flip(), ScoreKey::new(1, 3).unwrap());
        assert_eq!(key.flip().flip(), key);
        assert_eq!(key.to_string(), "(3, 1)");
    }
}
