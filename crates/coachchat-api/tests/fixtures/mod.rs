use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock coach server for exercising the HTTP client
pub struct CoachMockServer {
    server: MockServer,
}

impl CoachMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Chat endpoint URL, with the trailing slash the widget posts to
    pub fn endpoint(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Answer any chat request whose body contains `expected_body`
    pub async fn mock_answer(&self, expected_body: Value, answer: &str, message_id: &str) {
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": answer,
                "message_id": message_id
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Application-level error, delivered with the given status
    pub async fn mock_error(&self, status: u16, error: &str) {
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": error })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_feedback_success(&self, expected_body: Value) {
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Feedback received. Thank you!"
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_feedback_invalid(&self) {
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid feedback data" })),
            )
            .mount(&self.server)
            .await;
    }
}
