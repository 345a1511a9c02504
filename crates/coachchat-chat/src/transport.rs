use async_trait::async_trait;
use coachchat_types::{ChatReply, ChatRequest};
use thiserror::Error;

/// Anything below the application level that stopped a reply from arriving.
/// Callers treat every variant the same way; the split only feeds the logs.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("server responded with status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Network(String),

    #[error("could not decode reply: {0}")]
    Decode(String),
}

/// One request/response exchange with the coach endpoint.
///
/// Futures are not required to be `Send` so browser transports can implement
/// this directly.
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;
}

#[async_trait(?Send)]
impl<T: ChatTransport + ?Sized> ChatTransport for std::rc::Rc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        (**self).send(request).await
    }
}
