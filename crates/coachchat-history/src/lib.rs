//! Rolling conversation history for coachchat
//!
//! [`History`] is the bounded, chronologically ordered buffer of recent
//! turns. [`HistoryStore`] keeps one history in sync with a
//! [`KeyValueStore`], the storage surface both front ends provide.

pub mod history;
pub mod storage;
pub mod store;

pub use history::{History, TurnId};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::HistoryStore;
