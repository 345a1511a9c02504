use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use coachchat_chat::{ChatTransport, TransportError};
use coachchat_types::{ChatReply, ChatRequest, FeedbackReply, FeedbackRequest};

/// Applied to every request unless the caller picks another value
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Coach endpoint client
pub struct HttpChatClient {
    endpoint: String,
    feedback_endpoint: String,
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            feedback_endpoint: feedback_url(&endpoint),
            endpoint,
            client,
        })
    }

    /// Post feedback somewhere other than `<endpoint>/feedback`
    pub fn with_feedback_endpoint(mut self, url: impl Into<String>) -> Self {
        self.feedback_endpoint = url.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn feedback_endpoint(&self) -> &str {
        &self.feedback_endpoint
    }

    /// Rate a previously answered message
    pub async fn send_feedback(&self, feedback: &FeedbackRequest) -> Result<FeedbackReply> {
        log::debug!(
            "Posting feedback for {} (rating {}) to {}",
            feedback.message_id,
            feedback.rating,
            self.feedback_endpoint
        );

        let response = self
            .client
            .post(&self.feedback_endpoint)
            .json(feedback)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.feedback_endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read feedback response")?;
        let reply: Option<FeedbackReply> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            match reply.and_then(|r| r.error) {
                Some(error) => bail!("Feedback rejected: {}", error),
                None => bail!("Feedback endpoint responded with status {}", status),
            }
        }

        reply.with_context(|| format!("Unexpected feedback response: {}", body))
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        log::debug!(
            "POST {} coach='{}' history={} turns",
            self.endpoint,
            request.coach_name,
            request.history.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Feedback URL that sits next to the chat endpoint
pub fn feedback_url(endpoint: &str) -> String {
    format!("{}/feedback", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_url() {
        assert_eq!(feedback_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080/feedback");
        assert_eq!(feedback_url("https://coach.example/chat"), "https://coach.example/chat/feedback");
    }

    #[test]
    fn test_feedback_endpoint_override() {
        let client = HttpChatClient::new("http://localhost:8080/")
            .unwrap()
            .with_feedback_endpoint("http://localhost:9090/rate");
        assert_eq!(client.endpoint(), "http://localhost:8080/");
        assert_eq!(client.feedback_endpoint(), "http://localhost:9090/rate");
    }
}
