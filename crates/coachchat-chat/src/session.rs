use coachchat_history::{History, HistoryStore, KeyValueStore, TurnId};
use coachchat_types::{
    ChatReply, ChatRequest, Turn, GENERIC_FAILURE_MESSAGE, USER_SENDER,
};
use thiserror::Error;

use crate::transport::{ChatTransport, TransportError};
use crate::view::ChatView;

/// Why a submission did not start an exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    EmptyInput,

    #[error("a reply is still pending")]
    Busy,
}

/// Request built for a freshly appended turn, tagged with that turn's id
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub turn_id: TurnId,
    pub request: ChatRequest,
}

impl PendingRequest {
    pub fn coach_name(&self) -> &str {
        &self.request.coach_name
    }
}

/// What happened to a reply once it came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The answer was shown, recorded on the turn and persisted
    Answered {
        answer: String,
        message_id: Option<String>,
    },
    /// The server reported an error; shown as `Error: ...`, turn left pending
    Rejected { error: String },
    /// The exchange failed; generic failure text shown, turn left pending
    Failed,
    /// The turn is no longer at the tail of the history; reply dropped unseen
    Stale,
}

/// One mounted chat: the persisted history, the view rendering it, and the
/// bookkeeping for the request in flight.
///
/// An exchange is split into [`begin`](Self::begin) and
/// [`resolve`](Self::resolve) so the transport can be awaited without holding
/// a borrow of the session. [`submit`](Self::submit) chains the three steps
/// for callers that own the session outright.
pub struct ChatSession<S, V> {
    store: HistoryStore<S>,
    view: V,
    in_flight: Option<TurnId>,
    last_message_id: Option<String>,
}

impl<S: KeyValueStore, V: ChatView> ChatSession<S, V> {
    pub fn new(store: HistoryStore<S>, view: V) -> Self {
        Self {
            store,
            view,
            in_flight: None,
            last_message_id: None,
        }
    }

    /// Render the stored history from scratch
    pub fn mount(&mut self) {
        log::debug!("Rendering {} stored turns", self.store.history().len());
        render_history(&mut self.view, self.store.history());
    }

    /// Validate the input, show it, append a pending turn and build the
    /// request for it.
    pub fn begin(&mut self, input: &str, coach_name: &str) -> Result<PendingRequest, SubmitRejected> {
        let message = input.trim();
        if message.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }
        if let Some(id) = self.in_flight {
            log::debug!("Rejecting new message while {} is pending", id);
            return Err(SubmitRejected::Busy);
        }

        log::info!("Sending message to coach '{}': {}", coach_name, message);
        self.view.show_message(USER_SENDER, message);

        let turn_id = self.store.append(Turn::pending(message, coach_name));
        self.in_flight = Some(turn_id);
        self.view.set_busy(true);

        Ok(PendingRequest {
            turn_id,
            request: ChatRequest {
                message: message.to_string(),
                coach_name: coach_name.to_string(),
                history: self.store.history().to_vec(),
            },
        })
    }

    /// Apply the result of the exchange started by [`begin`](Self::begin).
    pub fn resolve(
        &mut self,
        pending: &PendingRequest,
        result: Result<ChatReply, TransportError>,
    ) -> ReplyOutcome {
        if self.in_flight == Some(pending.turn_id) {
            self.in_flight = None;
            self.view.set_busy(false);
        }

        if !self.store.history().is_tail(pending.turn_id) {
            log::warn!("Dropping reply for {}: turn is no longer current", pending.turn_id);
            return ReplyOutcome::Stale;
        }

        let coach_name = pending.coach_name();
        match result {
            Ok(ChatReply::Answer { answer, message_id }) => {
                self.view.show_message(coach_name, &answer);
                self.store.complete_if_tail(pending.turn_id, answer.clone());
                self.store.persist();
                if message_id.is_some() {
                    self.last_message_id = message_id.clone();
                }
                ReplyOutcome::Answered { answer, message_id }
            }
            Ok(ChatReply::ServerError { error }) => {
                log::warn!("Coach '{}' returned an error: {}", coach_name, error);
                self.view.show_message(coach_name, &format!("Error: {}", error));
                ReplyOutcome::Rejected { error }
            }
            Err(e) => {
                log::error!("Exchange with coach '{}' failed: {}", coach_name, e);
                self.view.show_message(coach_name, GENERIC_FAILURE_MESSAGE);
                ReplyOutcome::Failed
            }
        }
    }

    /// Run a whole exchange. Returns `None` when the input was rejected.
    pub async fn submit<T>(&mut self, transport: &T, input: &str, coach_name: &str) -> Option<ReplyOutcome>
    where
        T: ChatTransport + ?Sized,
    {
        let pending = match self.begin(input, coach_name) {
            Ok(pending) => pending,
            Err(reason) => {
                log::debug!("Message not sent: {}", reason);
                return None;
            }
        };
        let result = transport.send(&pending.request).await;
        Some(self.resolve(&pending, result))
    }

    /// Forget every turn, including the persisted copy, and blank the view.
    /// A reply still in flight will resolve as [`ReplyOutcome::Stale`].
    pub fn clear_history(&mut self) {
        self.store.clear();
        self.in_flight = None;
        self.last_message_id = None;
        self.view.set_busy(false);
        self.view.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id the server attached to the most recent answer, if any
    pub fn last_message_id(&self) -> Option<&str> {
        self.last_message_id.as_deref()
    }

    pub fn history(&self) -> &History {
        self.store.history()
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Tear the session down, handing back its parts
    pub fn into_parts(self) -> (HistoryStore<S>, V) {
        (self.store, self.view)
    }
}

/// Clear `view` and draw every turn of `history`
pub fn render_history<V: ChatView + ?Sized>(view: &mut V, history: &History) {
    view.clear();
    for turn in history {
        view.show_message(USER_SENDER, turn.user());
        if let Some(bot) = turn.bot().filter(|b| !b.is_empty()) {
            view.show_message(turn.coach_name(), bot);
        }
    }
}
