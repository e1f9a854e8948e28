use axum::body::Bytes;
use serde::Serialize;

/// Transport-independent request as seen by the dispatcher
#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    /// Verb exactly as received
    pub method: String,
    /// Request target exactly as received, query string included
    pub target: String,
    pub body: Bytes,
}

impl DispatchRequest {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Request carrying `payload` serialized as its JSON body
    pub fn json<T: Serialize>(
        method: impl Into<String>,
        target: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(method, target).with_body(serde_json::to_vec(payload)?))
    }

    /// Raw query string, without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}
