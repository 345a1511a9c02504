use std::collections::VecDeque;
use std::fmt;

use coachchat_types::{Turn, HISTORY_CAPACITY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Session-local identity of an appended turn.
///
/// Ids grow with every append and are never reused, so an id handed out for a
/// turn that has since been evicted or superseded never matches the tail
/// again. They are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// Bounded FIFO of recent turns, oldest first
#[derive(Debug, Clone)]
pub struct History {
    turns: VecDeque<Turn>,
    capacity: usize,
    appended: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
            appended: 0,
        }
    }

    /// Build a history from stored turns, keeping only the most recent ones
    /// when there are more than `capacity`.
    pub fn from_turns(capacity: usize, turns: Vec<Turn>) -> Self {
        let mut history = Self::new(capacity);
        let skip = turns.len().saturating_sub(history.capacity);
        history.turns.extend(turns.into_iter().skip(skip));
        history.appended = history.turns.len() as u64;
        history
    }

    /// Append a turn, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, turn: Turn) -> TurnId {
        if self.turns.len() == self.capacity {
            if let Some(evicted) = self.turns.pop_front() {
                log::debug!("History full, evicting oldest turn: {:?}", evicted.user());
            }
        }
        self.turns.push_back(turn);
        self.appended += 1;
        TurnId(self.appended)
    }

    /// Id of the most recently appended turn, if it is still held
    pub fn last_id(&self) -> Option<TurnId> {
        if self.turns.is_empty() {
            None
        } else {
            Some(TurnId(self.appended))
        }
    }

    pub fn is_tail(&self, id: TurnId) -> bool {
        self.last_id() == Some(id)
    }

    /// Set the answer on the last turn. Returns false when there is no turn or
    /// the last turn was already answered.
    pub fn complete_last(&mut self, answer: impl Into<String>) -> bool {
        match self.turns.back_mut() {
            Some(turn) => turn.complete(answer),
            None => false,
        }
    }

    /// Set the answer on the turn identified by `id`, provided it is still the
    /// tail of the history.
    pub fn complete(&mut self, id: TurnId, answer: impl Into<String>) -> bool {
        if !self.is_tail(id) {
            return false;
        }
        self.complete_last(answer)
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Turn;
    type IntoIter = std::collections::vec_deque::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

// Encoded as a plain array of turns.
impl Serialize for History {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.turns.iter())
    }
}

impl<'de> Deserialize<'de> for History {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let turns = Vec::<Turn>::deserialize(deserializer)?;
        Ok(History::from_turns(HISTORY_CAPACITY, turns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turn(n: usize) -> Turn {
        Turn::pending(format!("message {}", n), "Aiyoda")
    }

    #[test]
    fn test_push_keeps_most_recent_turns_in_order() {
        for n in 6..=20 {
            let mut history = History::default();
            for i in 0..n {
                history.push(turn(i));
            }
            let expected: Vec<Turn> = (n - HISTORY_CAPACITY..n).map(turn).collect();
            assert_eq!(history.len(), HISTORY_CAPACITY);
            assert_eq!(history.to_vec(), expected);
        }
    }

    #[test]
    fn test_push_below_capacity_keeps_everything() {
        let mut history = History::default();
        history.push(turn(0));
        history.push(turn(1));
        assert_eq!(history.to_vec(), vec![turn(0), turn(1)]);
    }

    #[test]
    fn test_complete_last_sets_answer_once() {
        let mut history = History::default();
        history.push(turn(0));
        assert!(history.complete_last("hi"));
        assert!(!history.complete_last("again"));
        assert_eq!(history.last().and_then(Turn::bot), Some("hi"));
    }

    #[test]
    fn test_complete_on_empty_history_is_noop() {
        let mut history = History::default();
        assert!(!history.complete_last("hi"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_complete_by_id_rejects_superseded_turn() {
        let mut history = History::default();
        let first = history.push(turn(0));
        let second = history.push(turn(1));

        assert!(!history.complete(first, "late"));
        assert!(history.iter().all(Turn::is_pending));

        assert!(history.complete(second, "fresh"));
        assert_eq!(history.last().and_then(Turn::bot), Some("fresh"));
    }

    #[test]
    fn test_ids_are_not_reused_after_clear() {
        let mut history = History::default();
        let id = history.push(turn(0));
        history.clear();
        let next = history.push(turn(1));
        assert_ne!(id, next);
        assert!(!history.is_tail(id));
    }

    #[test]
    fn test_from_turns_trims_to_capacity() {
        let turns: Vec<Turn> = (0..8).map(turn).collect();
        let history = History::from_turns(HISTORY_CAPACITY, turns);
        assert_eq!(history.to_vec(), (3..8).map(turn).collect::<Vec<_>>());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = History::default();
        history.push(Turn::completed("hello", "Aiyoda", "Greetings"));
        history.push(Turn::pending("and you?", "Aiyoda"));

        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(
            json,
            r#"[{"user":"hello","coachName":"Aiyoda","bot":"Greetings"},{"user":"and you?","coachName":"Aiyoda"}]"#
        );

        let restored: History = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.to_vec(), history.to_vec());
    }
}
