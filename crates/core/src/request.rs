use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::{FieldValue, Tabular};
use crate::types::RequestId;

/// A captured inbound HTTP call recorded by the gateway.
///
/// Ingest requests are immutable once created: the gateway appends them to
/// the store and never updates them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Unique request identifier.
    pub id: RequestId,

    /// HTTP method of the inbound call.
    pub method: String,

    /// Full request URL. Dispatch rules match against this.
    pub url: String,

    /// Request headers.
    pub headers: HashMap<String, String>,

    /// Raw request body, conventionally JSON but never parsed by the core.
    pub body: String,

    /// Raw query string, including the leading `?` if present.
    pub query_params: String,

    /// Source IP address of the caller.
    pub ip: String,

    /// User-agent header of the caller.
    pub user_agent: String,

    /// When the request was captured.
    pub received_at: DateTime<Utc>,
}

impl IngestRequest {
    /// Create a new ingest request. Generates a UUID-v4 id and stamps
    /// `received_at` with the given capture time.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RequestId::new(Uuid::new_v4().to_string()),
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: String::new(),
            query_params: String::new(),
            ip: String::new(),
            user_agent: String::new(),
            received_at,
        }
    }

    /// Set the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the raw query string.
    #[must_use]
    pub fn with_query_params(mut self, query: impl Into<String>) -> Self {
        self.query_params = query.into();
        self
    }

    /// Set the source IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    /// Set the user-agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Tabular for IngestRequest {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "method" => Some(self.method.as_str().into()),
            "url" => Some(self.url.as_str().into()),
            "body" => Some(self.body.as_str().into()),
            "query_params" => Some(self.query_params.as_str().into()),
            "ip" => Some(self.ip.as_str().into()),
            "user_agent" => Some(self.user_agent.as_str().into()),
            "received_at" => Some(self.received_at.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_creation() {
        let now = Utc::now();
        let req = IngestRequest::new("POST", "https://api.example.com/v1/webhook/hubspot/5", now)
            .with_ip("192.168.1.7")
            .with_body(r#"{"message": "hello"}"#);
        assert_eq!(req.method, "POST");
        assert_eq!(req.ip, "192.168.1.7");
        assert_eq!(req.received_at, now);
        assert!(!req.id.as_str().is_empty());
    }

    #[test]
    fn request_fields_resolve() {
        let req = IngestRequest::new("GET", "https://api.example.com/v1/users/1", Utc::now());
        assert_eq!(
            req.field("url").map(|v| v.display_string()),
            Some("https://api.example.com/v1/users/1".to_owned())
        );
        assert!(req.field("nonexistent").is_none());
    }

    #[test]
    fn request_serde_roundtrip() {
        let req = IngestRequest::new("PUT", "https://api.example.com/v1/orders/9", Utc::now());
        let json = serde_json::to_string(&req).unwrap();
        let back: IngestRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, req.id);
        assert_eq!(back.url, req.url);
    }
}
