use anyhow::{bail, Result};
use std::io::Write;

use coachchat_chat::{ChatTransport, ReplyOutcome};

use crate::app::setup::{build_client, open_session};
use crate::config::AppConfig;
use crate::terminal_view::TerminalView;
use crate::transcript_logger::TranscriptLogger;

/// Send one message, print the exchange and exit
pub async fn run_message_mode(config: &AppConfig, message: &str) -> Result<()> {
    let client = build_client(config)?;
    run_once(config, &client, message, std::io::stdout()).await?;
    Ok(())
}

/// One exchange rendered to `out`. Anything but an answer is an error so the
/// process exit status reflects it.
pub async fn run_once<T, W>(config: &AppConfig, transport: &T, message: &str, out: W) -> Result<ReplyOutcome>
where
    T: ChatTransport + ?Sized,
    W: Write,
{
    let view = TerminalView::new(out, config.color);
    let mut session = open_session(config, view);
    let coach = config.coach.name.clone();

    let mut logger = match &config.transcript_dir {
        Some(dir) => match TranscriptLogger::new(dir).await {
            Ok(logger) => Some(logger),
            Err(e) => {
                log::warn!("Transcript logging disabled: {}", e);
                None
            }
        },
        None => None,
    };

    let Some(outcome) = session.submit(transport, message, &coach).await else {
        bail!("Message is empty");
    };

    if let Some(logger) = logger.as_mut() {
        logger.log_exchange(&coach, message.trim(), &outcome).await;
    }

    match &outcome {
        ReplyOutcome::Answered { .. } | ReplyOutcome::Stale => Ok(outcome),
        ReplyOutcome::Rejected { error } => bail!("Coach '{}' returned an error: {}", coach, error),
        ReplyOutcome::Failed => bail!("Request to {} failed", config.endpoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachchat_api::HttpChatClient;
    use coachchat_history::{FileStore, HistoryStore};
    use coachchat_types::Turn;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::new(format!("{}/", server.uri()), dir.path().join("history.json"));
        config.color = false;
        config
    }

    #[tokio::test]
    async fn test_answer_is_printed_and_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"message": "hello", "coach_name": "Aiyoda"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "hi"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let mut config = config(&server, &dir);
        config.transcript_dir = Some(dir.path().join("transcripts"));
        let client = HttpChatClient::new(config.endpoint.clone()).unwrap();

        let mut out = Vec::new();
        let outcome = run_once(&config, &client, "  hello ", &mut out).await.unwrap();

        assert!(matches!(outcome, ReplyOutcome::Answered { .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "You: hello\n…\nAiyoda: hi\n");

        let stored = HistoryStore::new(FileStore::new(&config.history_file));
        assert_eq!(stored.history().to_vec(), vec![Turn::completed("hello", "Aiyoda", "hi")]);

        let transcripts: Vec<_> = std::fs::read_dir(dir.path().join("transcripts"))
            .unwrap()
            .collect();
        assert_eq!(transcripts.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_fails_without_persisting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad"})))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = config(&server, &dir);
        let client = HttpChatClient::new(config.endpoint.clone()).unwrap();

        let mut out = Vec::new();
        let err = run_once(&config, &client, "hello", &mut out).await.unwrap_err();

        assert!(err.to_string().contains("bad"));
        assert!(String::from_utf8(out).unwrap().ends_with("Aiyoda: Error: bad\n"));
        assert!(!config.history_file.exists());
    }

    #[tokio::test]
    async fn test_http_failure_shows_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = config(&server, &dir);
        let client = HttpChatClient::new(config.endpoint.clone()).unwrap();

        let mut out = Vec::new();
        assert!(run_once(&config, &client, "hello", &mut out).await.is_err());
        assert!(String::from_utf8(out)
            .unwrap()
            .ends_with("Aiyoda: An error occurred. Please try again.\n"));
    }

    #[tokio::test]
    async fn test_empty_message_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "hi"})))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = config(&server, &dir);
        let client = HttpChatClient::new(config.endpoint.clone()).unwrap();

        let mut out = Vec::new();
        assert!(run_once(&config, &client, "   ", &mut out).await.is_err());
        assert!(out.is_empty());
    }
}
