//! Precomputed state table
//!
//! Every reachable score state is built once, bottom-up from the terminal
//! states, and wired to its two successors. Only the `server >= receiver`
//! half is built directly; the other half is derived by flipping.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::error::{Result, TennisError};
use crate::key::ScoreKey;
use crate::state::{Role, State, StateId};

/// Highest point count below deuce
const FORTY: u8 = 3;

static GLOBAL: OnceLock<Result<StateTable>> = OnceLock::new();

/// Immutable graph of score states
#[derive(Debug)]
pub struct StateTable {
    states: Vec<State>,
    index: FxHashMap<ScoreKey, StateId>,
    initial: StateId,
}

impl StateTable {
    /// Process-wide table, built on first use
    pub fn global() -> Result<&'static StateTable> {
        GLOBAL.get_or_init(Self::build).as_ref().map_err(Clone::clone)
    }

    /// Build a fresh table
    pub fn build() -> Result<Self> {
        TableBuilder::new().build()
    }

    /// Love-All
    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    /// State registered for a score key. Love-All has no key.
    pub fn lookup(&self, key: ScoreKey) -> Option<StateId> {
        self.index.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u8), s))
    }

    /// The same state with server and receiver swapped
    pub fn mirror(&self, id: StateId) -> Result<StateId> {
        match *self.get(id) {
            State::Generic { server, receiver, .. } => {
                let key = ScoreKey::new(receiver, server)?;
                self.lookup(key).ok_or_else(|| {
                    TennisError::InvalidConfiguration(format!("no mirror registered for {}", key))
                })
            }
            State::All { .. } | State::Deuce => Ok(id),
            State::Advantage(role) => Ok(StateId::advantage(role.opponent())),
            State::Win(role) => Ok(StateId::win(role.opponent())),
        }
    }

    /// `(server wins, receiver wins)` successors; None for wins
    pub fn successors(&self, id: StateId) -> Option<(StateId, StateId)> {
        match *self.get(id) {
            State::Generic { server_wins, receiver_wins, .. }
            | State::All { server_wins, receiver_wins, .. } => Some((server_wins, receiver_wins)),
            State::Deuce => Some((StateId::ADVANTAGE_SERVER, StateId::ADVANTAGE_RECEIVER)),
            State::Advantage(Role::Server) => Some((StateId::WIN_SERVER, StateId::DEUCE)),
            State::Advantage(Role::Receiver) => Some((StateId::DEUCE, StateId::WIN_RECEIVER)),
            State::Win(_) => None,
        }
    }

    /// All states reachable from Love-All, in breadth-first order
    pub fn reachable(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.states.len()];
        let mut order = vec![self.initial];
        seen[self.initial.index()] = true;
        let mut i = 0;
        while i < order.len() {
            let next_ids = self.successors(order[i]).into_iter().flat_map(|(s, r)| [s, r]);
            for next in next_ids {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    order.push(next);
                }
            }
            i += 1;
        }
        order
    }
}

// ============================================================================
// BUILDER
// ============================================================================

struct TableBuilder {
    states: Vec<State>,
    index: FxHashMap<ScoreKey, StateId>,
}

impl TableBuilder {
    fn new() -> Self {
        // Order matches the StateId constants
        let states = vec![
            State::Deuce,
            State::Advantage(Role::Server),
            State::Advantage(Role::Receiver),
            State::Win(Role::Server),
            State::Win(Role::Receiver),
        ];
        Self {
            states,
            index: FxHashMap::default(),
        }
    }

    fn build(mut self) -> Result<StateTable> {
        self.seed_special_states()?;

        // Descending sum: both successors of (i, j) are already present
        for i in (1..=FORTY).rev() {
            for j in (0..=i).rev() {
                let key = ScoreKey::new(i, j)?;
                if self.index.contains_key(&key) {
                    continue;
                }
                let server_wins = self.require(key.increment_server()?)?;
                let receiver_wins = self.require(key.increment_receiver()?)?;
                if i == j {
                    let id = self.push(State::All {
                        points: i,
                        server_wins,
                        receiver_wins,
                    });
                    self.index.insert(key, id);
                } else {
                    let id = self.push(State::Generic {
                        server: i,
                        receiver: j,
                        server_wins,
                        receiver_wins,
                    });
                    self.index.insert(key, id);
                    self.flip(id)?;
                }
            }
        }

        let server_wins = self.require(ScoreKey::new(1, 0)?)?;
        let receiver_wins = self.require(ScoreKey::new(0, 1)?)?;
        let initial = self.push(State::All {
            points: 0,
            server_wins,
            receiver_wins,
        });

        tracing::debug!(
            "Built state table: {} states, {} keys",
            self.states.len(),
            self.index.len()
        );

        Ok(StateTable {
            states: self.states,
            index: self.index,
            initial,
        })
    }

    fn seed_special_states(&mut self) -> Result<()> {
        self.index.insert(ScoreKey::new(3, 3)?, StateId::DEUCE);
        self.index.insert(ScoreKey::new(4, 4)?, StateId::DEUCE);
        self.index.insert(ScoreKey::new(4, 3)?, StateId::ADVANTAGE_SERVER);
        self.index.insert(ScoreKey::new(3, 4)?, StateId::ADVANTAGE_RECEIVER);

        // Wins that were not preceded by an advantage
        for i in 0..FORTY {
            let key = ScoreKey::new(4, i)?;
            self.index.insert(key, StateId::WIN_SERVER);
            self.index.insert(key.flip(), StateId::WIN_RECEIVER);
        }
        Ok(())
    }

    /// Register the mirror of a state and return its id.
    ///
    /// Memoized by key, so each mirrored state is created once.
    fn flip(&mut self, id: StateId) -> Result<StateId> {
        let state = self.states[id.index()];
        match state {
            State::Generic {
                server,
                receiver,
                server_wins,
                receiver_wins,
            } => {
                let key = ScoreKey::new(receiver, server)?;
                if let Some(&existing) = self.index.get(&key) {
                    return Ok(existing);
                }
                let flipped = State::Generic {
                    server: receiver,
                    receiver: server,
                    server_wins: self.flip(receiver_wins)?,
                    receiver_wins: self.flip(server_wins)?,
                };
                let flipped_id = self.push(flipped);
                self.index.insert(key, flipped_id);
                Ok(flipped_id)
            }
            State::All { .. } | State::Deuce => Ok(id),
            State::Advantage(role) => Ok(StateId::advantage(role.opponent())),
            State::Win(role) => Ok(StateId::win(role.opponent())),
        }
    }

    fn require(&self, key: ScoreKey) -> Result<StateId> {
        self.index.get(&key).copied().ok_or_else(|| {
            TennisError::InvalidConfiguration(format!("no state registered for {}", key))
        })
    }

    fn push(&mut self, state: State) -> StateId {
        let id = StateId(self.states.len() as u8);
        self.states.push(state);
        id
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::MAX_KEY_POINTS;
    use crate::state::Players;

    fn key(s: u8, r: u8) -> ScoreKey {
        ScoreKey::new(s, r).unwrap()
    }

    #[test]
    fn test_table_size() {
        let table = StateTable::build().unwrap();
        // 15 score pairs below deuce, deuce, two advantages, two wins
        assert_eq!(table.len(), 20);
        assert_eq!(table.reachable().len(), 20);
    }

    #[test]
    fn test_special_keys_share_states() {
        let table = StateTable::build().unwrap();
        assert_eq!(table.lookup(key(3, 3)), Some(StateId::DEUCE));
        assert_eq!(table.lookup(key(4, 4)), Some(StateId::DEUCE));
        assert_eq!(table.lookup(key(4, 3)), Some(StateId::ADVANTAGE_SERVER));
        assert_eq!(table.lookup(key(3, 4)), Some(StateId::ADVANTAGE_RECEIVER));
        for i in 0..3 {
            assert_eq!(table.lookup(key(4, i)), Some(StateId::WIN_SERVER));
            assert_eq!(table.lookup(key(i, 4)), Some(StateId::WIN_RECEIVER));
        }
        assert_eq!(table.lookup(key(0, 0)), None);
    }

    #[test]
    fn test_generic_successors() {
        let table = StateTable::build().unwrap();
        let ctx = Players::new("A", "B").unwrap();
        for i in 0..=3u8 {
            for j in 0..=3u8 {
                if i == j {
                    continue;
                }
                let id = table.lookup(key(i, j)).unwrap();
                let state = table.get(id);
                let on_server = state.server_won_point(&ctx).unwrap();
                let on_receiver = state.receiver_won_point(&ctx).unwrap();
                assert_eq!(Some(on_server), table.lookup(key(i + 1, j)));
                assert_eq!(Some(on_receiver), table.lookup(key(i, j + 1)));
            }
        }
    }

    #[test]
    fn test_every_state_has_successors_except_wins() {
        let table = StateTable::build().unwrap();
        let ctx = Players::new("A", "B").unwrap();
        for id in table.reachable() {
            let state = table.get(id);
            if state.is_terminal() {
                assert!(state.server_won_point(&ctx).is_err());
                assert!(state.receiver_won_point(&ctx).is_err());
            } else {
                assert!(state.server_won_point(&ctx).is_ok(), "{}", state);
                assert!(state.receiver_won_point(&ctx).is_ok(), "{}", state);
            }
        }
    }

    #[test]
    fn test_advantage_successors() {
        let table = StateTable::build().unwrap();
        assert_eq!(
            table.successors(StateId::ADVANTAGE_RECEIVER),
            Some((StateId::DEUCE, StateId::WIN_RECEIVER))
        );
        assert_eq!(table.successors(StateId::WIN_SERVER), None);
    }

    #[test]
    fn test_mirror_is_involution() {
        let table = StateTable::build().unwrap();
        for (id, state) in table.iter() {
            let mirrored = table.mirror(id).unwrap();
            assert_eq!(table.mirror(mirrored).unwrap(), id, "{}", state);
        }
        let fifteen_love = table.lookup(key(1, 0)).unwrap();
        let love_fifteen = table.lookup(key(0, 1)).unwrap();
        assert_eq!(table.mirror(fifteen_love).unwrap(), love_fifteen);
        assert_eq!(table.mirror(table.initial()).unwrap(), table.initial());
    }

    #[test]
    fn test_displayable_states_unique() {
        let table = StateTable::build().unwrap();
        let ctx = Players::new("A", "B").unwrap();
        let mut scores: Vec<String> = table.iter().map(|(_, s)| s.score(&ctx)).collect();
        scores.sort();
        scores.dedup();
        assert_eq!(scores.len(), table.len());
    }

    #[test]
    fn test_mirror_reports_missing_key() {
        let mut table = StateTable::build().unwrap();
        let thirty_love = table.lookup(key(2, 0)).unwrap();
        table.index.remove(&key(0, 2));
        assert!(matches!(
            table.mirror(thirty_love),
            Err(TennisError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_every_handed_out_id_resolves() {
        let table = StateTable::build().unwrap();
        let mut ids = vec![
            table.initial(),
            StateId::DEUCE,
            StateId::ADVANTAGE_SERVER,
            StateId::ADVANTAGE_RECEIVER,
            StateId::WIN_SERVER,
            StateId::WIN_RECEIVER,
        ];
        for (id, _) in table.iter() {
            ids.push(id);
            ids.push(table.mirror(id).unwrap());
            if let Some((s, r)) = table.successors(id) {
                ids.push(s);
                ids.push(r);
            }
        }
        for i in 0..=MAX_KEY_POINTS {
            for j in 0..=MAX_KEY_POINTS {
                ids.extend(table.lookup(key(i, j)));
            }
        }
        assert!(ids.iter().all(|id| id.index() < table.len()));
    }

    #[test]
    fn test_global_is_shared() {
        let a = StateTable::global().unwrap();
        let b = StateTable::global().unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
