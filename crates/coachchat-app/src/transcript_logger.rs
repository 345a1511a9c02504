use anyhow::Result;
use chrono::Local;
use coachchat_chat::ReplyOutcome;
use coachchat_types::GENERIC_FAILURE_MESSAGE;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO-8601 local time
    role: &'a str,
    coach: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<&'a str>,
}

/// Appends every exchange to a JSONL transcript
pub struct TranscriptLogger {
    file_path: PathBuf,
    file: Option<fs::File>,
}

impl TranscriptLogger {
    /// Create a logger writing to a new file named after the current local time
    pub async fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).await?;

        let file_name = format!("transcript-{}.jsonl", Local::now().format("%Y%m%d-%H%M%S"));
        let file_path = dir.join(file_name);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;

        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Record a user message and the coach line shown for its outcome. A
    /// stale reply was never shown, so only the user line is written.
    pub async fn log_exchange(&mut self, coach: &str, message: &str, outcome: &ReplyOutcome) {
        self.log("user", coach, message, None).await;
        match outcome {
            ReplyOutcome::Answered { answer, message_id } => {
                self.log("coach", coach, answer, message_id.as_deref()).await;
            }
            ReplyOutcome::Rejected { error } => {
                self.log("coach", coach, &format!("Error: {}", error), None).await;
            }
            ReplyOutcome::Failed => {
                self.log("coach", coach, GENERIC_FAILURE_MESSAGE, None).await;
            }
            ReplyOutcome::Stale => {}
        }
    }

    /// Write one line; failures disable the logger instead of interrupting the chat
    pub async fn log(&mut self, role: &str, coach: &str, content: &str, message_id: Option<&str>) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role,
            coach,
            content,
            message_id,
        };

        let mut line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Could not encode transcript entry: {}", e);
                return;
            }
        };
        line.push('\n');

        let written = match file.write_all(line.as_bytes()).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            log::warn!(
                "Transcript logging disabled, write to {} failed: {}",
                self.file_path.display(),
                e
            );
            self.file = None;
        }
    }
}
