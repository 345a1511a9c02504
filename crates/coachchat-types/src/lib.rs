//! Core types shared by every coachchat crate
//!
//! Holds the conversation [`Turn`], the wire shapes exchanged with the coach
//! endpoint and the constants both front ends agree on.

use serde::{Deserialize, Serialize};

pub mod coach;

pub use coach::Coach;

// ============================================================================
// Constants
// ============================================================================

/// Number of turns kept in the rolling history
pub const HISTORY_CAPACITY: usize = 5;

/// Storage key the history is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "conversationHistory";

/// Sender label used for the user's own messages
pub const USER_SENDER: &str = "You";

/// Text shown when the exchange fails below the application level
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

// ============================================================================
// Conversation
// ============================================================================

/// One user message and, once it arrives, the coach's answer.
///
/// `bot` is written at most once; see [`Turn::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user: String,
    #[serde(rename = "coachName")]
    coach_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bot: Option<String>,
}

impl Turn {
    /// A turn that is still waiting for its answer
    pub fn pending(user: impl Into<String>, coach_name: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            coach_name: coach_name.into(),
            bot: None,
        }
    }

    /// A turn that already carries an answer
    pub fn completed(
        user: impl Into<String>,
        coach_name: impl Into<String>,
        bot: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            coach_name: coach_name.into(),
            bot: Some(bot.into()),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn coach_name(&self) -> &str {
        &self.coach_name
    }

    pub fn bot(&self) -> Option<&str> {
        self.bot.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.bot.is_none()
    }

    /// Record the answer. Returns false and leaves the turn untouched if an
    /// answer was already recorded.
    pub fn complete(&mut self, answer: impl Into<String>) -> bool {
        if self.bot.is_some() {
            return false;
        }
        self.bot = Some(answer.into());
        true
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Body posted to the coach endpoint for every user turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub coach_name: String,
    pub history: Vec<Turn>,
}

/// Decoded body of a coach endpoint reply.
///
/// An `error` field wins over `answer`, and a body carrying neither is
/// rejected at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawReply")]
pub enum ChatReply {
    Answer {
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    ServerError {
        error: String,
    },
}

#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
}

impl TryFrom<RawReply> for ChatReply {
    type Error = String;

    fn try_from(raw: RawReply) -> Result<Self, String> {
        match (raw.error, raw.answer) {
            (Some(error), _) if !error.is_empty() => Ok(ChatReply::ServerError { error }),
            (_, Some(answer)) => Ok(ChatReply::Answer {
                answer,
                message_id: raw.message_id,
            }),
            _ => Err("reply carries neither an answer nor an error".to_string()),
        }
    }
}

impl ChatReply {
    pub fn answer(answer: impl Into<String>) -> Self {
        ChatReply::Answer {
            answer: answer.into(),
            message_id: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        ChatReply::ServerError {
            error: error.into(),
        }
    }
}

/// Rating posted back for a previously answered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub message_id: String,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Feedback endpoint reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
