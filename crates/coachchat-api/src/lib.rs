//! HTTP client for the coach endpoint
//!
//! Implements [`coachchat_chat::ChatTransport`] over `reqwest` and posts
//! answer feedback.

pub mod coach_client;

pub use coach_client::{feedback_url, HttpChatClient, DEFAULT_TIMEOUT};
