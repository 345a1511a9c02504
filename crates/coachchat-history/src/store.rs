use coachchat_types::{Turn, DEFAULT_STORAGE_KEY, HISTORY_CAPACITY};

use crate::history::{History, TurnId};
use crate::storage::KeyValueStore;

/// A [`History`] kept in sync with one entry of a [`KeyValueStore`].
///
/// Reads fail soft and writes are best effort: a missing or malformed entry
/// loads as an empty history, and a failed write is logged and dropped. The
/// in-memory history is authoritative for the rest of the session either way.
pub struct HistoryStore<S> {
    storage: S,
    key: String,
    history: History,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open the store under the default key and load whatever is persisted
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            history: History::default(),
        };
        store.history = store.load();
        store
    }

    /// Decode the persisted history. Absent, unreadable or malformed entries
    /// yield an empty history.
    pub fn load(&self) -> History {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return History::default(),
            Err(e) => {
                log::warn!("Could not read stored history '{}': {}", self.key, e);
                return History::default();
            }
        };

        match serde_json::from_str::<Vec<Turn>>(&raw) {
            Ok(turns) => {
                log::debug!("Loaded {} stored turns from '{}'", turns.len(), self.key);
                History::from_turns(HISTORY_CAPACITY, turns)
            }
            Err(e) => {
                log::warn!("Ignoring malformed stored history '{}': {}", self.key, e);
                History::default()
            }
        }
    }

    /// Add a pending turn at the end, evicting the oldest past capacity
    pub fn append(&mut self, turn: Turn) -> TurnId {
        self.history.push(turn)
    }

    /// Record the answer on the last turn. Calling this on an empty history or
    /// an already answered turn does nothing.
    pub fn complete(&mut self, response: impl Into<String>) {
        if !self.history.complete_last(response) {
            log::debug!("Ignoring completion: no pending turn at the tail of the history");
        }
    }

    /// Record the answer only if `id` is still the tail turn. Returns whether
    /// the answer was applied.
    pub fn complete_if_tail(&mut self, id: TurnId, response: impl Into<String>) -> bool {
        let applied = self.history.complete(id, response);
        if !applied {
            log::debug!("Discarding answer for {}: no longer the pending tail turn", id);
        }
        applied
    }

    /// Write the full history to storage. Failures are logged, not returned.
    pub fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.history) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("Could not encode history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &encoded) {
            log::warn!("Could not persist history '{}': {}", self.key, e);
        }
    }

    /// Drop every turn and the persisted entry
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("Could not remove stored history '{}': {}", self.key, e);
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
