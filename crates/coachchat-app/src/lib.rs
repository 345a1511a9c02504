//! Coachchat terminal client
//!
//! Wires the shared chat session to a terminal view, a file-backed history
//! and the HTTP coach client.

// Re-export workspace crates
pub use coachchat_api::{self as api, HttpChatClient};
pub use coachchat_chat::{self as chat, ChatSession, ChatView, ReplyOutcome};
pub use coachchat_history::{self as history, FileStore, HistoryStore};
pub use coachchat_types::{self as types, Coach, Turn};

// Local modules
pub mod app;
pub mod cli;
pub mod config;
pub mod terminal_view;
pub mod transcript_logger;

// Re-exports from local modules
pub use app::{run_message_mode, run_repl_mode, setup_from_cli};
pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use terminal_view::TerminalView;
pub use transcript_logger::TranscriptLogger;
