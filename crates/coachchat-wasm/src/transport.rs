use async_trait::async_trait;
use coachchat_chat::{ChatTransport, TransportError};
use coachchat_types::{ChatReply, ChatRequest};
use gloo_net::http::Request;

/// Posts chat requests with the browser's `fetch`
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ChatTransport for FetchTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = Request::post(&self.endpoint)
            .json(request)
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| TransportError::Decode(format!("{:?}", e)))
    }
}
