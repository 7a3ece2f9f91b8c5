//! Snapshot history for undo.
//!
//! Each snapshot is an owned deep copy of the innings; a later mutation can
//! never reach back into one that has already been pushed.

use crate::innings::InningsState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Snapshots retained before the oldest is discarded.
pub const MAX_UNDO: usize = 40;

/// Independent copy of an innings at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot(InningsState);

impl Snapshot {
    /// Captures `state`.
    pub fn capture(state: &InningsState) -> Self {
        Self(state.clone())
    }

    /// The captured innings.
    pub fn state(&self) -> &InningsState {
        &self.0
    }

    /// Consumes the snapshot, yielding the innings.
    pub fn into_state(self) -> InningsState {
        self.0
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Restores a snapshot from JSON produced by [`Snapshot::encode`].
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }
}

/// Bounded stack of snapshots.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    stack: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoHistory {
    /// Creates an empty history holding [`MAX_UNDO`] snapshots.
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNDO)
    }

    /// Creates an empty history holding at most `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Pushes a copy of `state`, dropping the oldest snapshot when full.
    #[instrument(skip(self, state), fields(depth = self.stack.len()))]
    pub fn push(&mut self, state: &InningsState) {
        self.stack.push_back(Snapshot::capture(state));
        if self.stack.len() > self.capacity {
            self.stack.pop_front();
            debug!("Oldest snapshot discarded");
        }
    }

    /// Pops the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop_back()
    }

    /// Most recent snapshot, left in place.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.stack.back()
    }

    /// Discards every snapshot.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Snapshots held.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Maximum snapshots held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Delivery, MatchConfig, delivery};

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut state = InningsState::new(&MatchConfig::default());
        let mut history = UndoHistory::new();
        history.push(&state);
        delivery::apply(&mut state, Delivery::run(4)).unwrap();

        let restored = history.pop().unwrap().into_state();
        assert_eq!(restored.runs(), 0);
        assert_eq!(restored, InningsState::new(&MatchConfig::default()));
        assert_eq!(state.runs(), 4);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut state = InningsState::new(&MatchConfig::default());
        let mut history = UndoHistory::with_capacity(3);
        for _ in 0..5 {
            history.push(&state);
            delivery::apply(&mut state, Delivery::run(1)).unwrap();
        }
        assert_eq!(history.len(), 3);
        let runs: Vec<u32> = std::iter::from_fn(|| history.pop())
            .map(|s| s.state().runs())
            .collect();
        assert_eq!(runs, vec![4, 3, 2]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        let mut history = UndoHistory::default();
        let state = InningsState::new(&MatchConfig::default());
        for _ in 0..(MAX_UNDO + 10) {
            history.push(&state);
        }
        assert_eq!(history.len(), MAX_UNDO);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut state = InningsState::new(&MatchConfig::default());
        for ball in [Delivery::run(4), Delivery::run(1), Delivery::Wicket] {
            delivery::apply(&mut state, ball).unwrap();
        }
        let snapshot = Snapshot::capture(&state);
        let json = snapshot.encode().unwrap();
        assert_eq!(Snapshot::decode(&json).unwrap(), snapshot);
    }
}
