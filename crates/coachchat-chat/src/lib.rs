//! Chat session logic shared by the terminal client and the browser widget
//!
//! A [`ChatSession`] owns the persisted history and drives a [`ChatView`];
//! replies come from any [`ChatTransport`].

pub mod session;
pub mod transport;
pub mod view;

pub use session::{render_history, ChatSession, PendingRequest, ReplyOutcome, SubmitRejected};
pub use transport::{ChatTransport, TransportError};
pub use view::ChatView;
