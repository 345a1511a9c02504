mod fixtures;

use coachchat_api::HttpChatClient;
use coachchat_chat::{ChatTransport, TransportError};
use coachchat_types::{ChatReply, ChatRequest, FeedbackRequest, Turn};
use fixtures::CoachMockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

fn request() -> ChatRequest {
    ChatRequest {
        message: "How do I stay focused?".to_string(),
        coach_name: "Aiyoda".to_string(),
        history: vec![
            Turn::completed("hello", "Aiyoda", "Greetings, young one"),
            Turn::pending("How do I stay focused?", "Aiyoda"),
        ],
    }
}

#[tokio::test]
async fn test_send_posts_request_and_decodes_answer() {
    let server = CoachMockServer::new().await;
    server
        .mock_answer(
            json!({
                "message": "How do I stay focused?",
                "coach_name": "Aiyoda",
                "history": [
                    {"user": "hello", "coachName": "Aiyoda", "bot": "Greetings, young one"},
                    {"user": "How do I stay focused?", "coachName": "Aiyoda"}
                ]
            }),
            "Focus, you must.",
            "msg-42",
        )
        .await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let reply = client.send(&request()).await.unwrap();

    assert_eq!(
        reply,
        ChatReply::Answer {
            answer: "Focus, you must.".to_string(),
            message_id: Some("msg-42".to_string()),
        }
    );
}

#[tokio::test]
async fn test_error_field_with_ok_status_is_a_reply() {
    let server = CoachMockServer::new().await;
    server.mock_error(200, "bad").await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let reply = client.send(&request()).await.unwrap();

    assert_eq!(reply, ChatReply::error("bad"));
}

#[tokio::test]
async fn test_non_ok_status_is_transport_failure() {
    let server = CoachMockServer::new().await;
    server.mock_error(400, "Missing message or coach name").await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let err = client.send(&request()).await.unwrap_err();

    assert!(matches!(err, TransportError::Status(400)));
}

#[tokio::test]
async fn test_undecodable_body_is_transport_failure() {
    let server = CoachMockServer::new().await;
    server.mock_raw(200, "<html>oops</html>").await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let err = client.send(&request()).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_failure() {
    let client = HttpChatClient::new("http://127.0.0.1:9/").unwrap();
    let err = client.send(&request()).await.unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn test_feedback_roundtrip() {
    let server = CoachMockServer::new().await;
    server
        .mock_feedback_success(json!({
            "message_id": "msg-42",
            "rating": 5,
            "comment": "spot on"
        }))
        .await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let reply = client
        .send_feedback(&FeedbackRequest {
            message_id: "msg-42".to_string(),
            rating: 5,
            comment: Some("spot on".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(reply.status.as_deref(), Some("success"));
}

#[tokio::test]
async fn test_feedback_rejection_surfaces_server_error() {
    let server = CoachMockServer::new().await;
    server.mock_feedback_invalid().await;

    let client = HttpChatClient::new(server.endpoint()).unwrap();
    let err = client
        .send_feedback(&FeedbackRequest {
            message_id: "msg-42".to_string(),
            rating: 1,
            comment: None,
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid feedback data"));
}
