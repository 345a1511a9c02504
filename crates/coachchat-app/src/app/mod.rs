pub mod commands;
pub mod repl;
pub mod setup;
pub mod task;

pub use repl::run_repl_mode;
pub use setup::{build_client, open_session, resolve_config, setup_from_cli};
pub use task::{run_message_mode, run_once};
