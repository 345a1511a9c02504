use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for coachchat
#[derive(Parser, Debug, Default)]
#[command(name = "coachchat")]
#[command(about = "Coachchat - talk to your coach from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint the messages are posted to (e.g., http://localhost:8080/)
    #[arg(long, value_name = "URL", env = "COACHCHAT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Feedback endpoint (default: <endpoint>/feedback)
    #[arg(long, value_name = "URL", env = "COACHCHAT_FEEDBACK_ENDPOINT")]
    pub feedback_endpoint: Option<String>,

    /// Coach to talk to
    #[arg(long, short = 'c', value_name = "NAME", env = "COACHCHAT_COACH")]
    pub coach: Option<String>,

    /// Directory of coach persona files (*.json) to discover coaches from
    #[arg(long, value_name = "DIR", env = "COACHCHAT_COACH_DIR")]
    pub coach_dir: Option<PathBuf>,

    /// File the conversation history is persisted to
    #[arg(long, value_name = "PATH", env = "COACHCHAT_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Key the history is stored under inside the history file
    #[arg(long, value_name = "KEY", env = "COACHCHAT_STORAGE_KEY")]
    pub storage_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", env = "COACHCHAT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Directory to write JSONL transcripts of every exchange to
    #[arg(long, value_name = "DIR", env = "COACHCHAT_TRANSCRIPT_DIR")]
    pub transcript_dir: Option<PathBuf>,

    /// Path to config file (default: ~/.coachchat/config.toml)
    #[arg(long, value_name = "PATH", env = "COACHCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Send a single message, print the reply and exit
    #[arg(long, short = 'm', value_name = "TEXT")]
    pub message: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the stored conversation history
    History,
    /// Delete the stored conversation history
    Clear,
    /// List the coaches that can be selected
    Coaches,
}
