use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::{FieldValue, Tabular};
use crate::types::{ConfigId, LogId, RequestId};

/// Outcome classification of a simulated dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchStatus {
    Success,
    Failed,
}

/// The recorded outcome of delivering one ingest request to its matched
/// rule's target.
///
/// Dispatch logs are append-only: one per successfully matched request,
/// never updated after creation. Rule fields are denormalized so a log stays
/// readable after its rule is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchLog {
    /// Unique log identifier.
    pub id: LogId,

    /// The ingest request this dispatch originated from.
    pub request_id: RequestId,

    /// Id of the rule that matched.
    pub rule_id: ConfigId,

    /// Name of the rule that matched.
    pub rule_name: String,

    /// Target URL the dispatch was delivered to.
    pub target_url: String,

    /// Outcome classification.
    pub status: DispatchStatus,

    /// HTTP-like status code of the delivery.
    pub status_code: u16,

    /// Retry attempts actually consumed.
    pub retry_attempts: u32,

    /// Raw response body from the target.
    pub response_body: String,

    /// When the dispatch completed.
    pub completed_at: DateTime<Utc>,

    /// Delivery duration in milliseconds.
    pub execution_time_ms: u64,
}

impl Tabular for DispatchLog {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "request_id" => Some(self.request_id.as_str().into()),
            "rule_id" => Some(self.rule_id.as_str().into()),
            "rule_name" => Some(self.rule_name.as_str().into()),
            "target_url" => Some(self.target_url.as_str().into()),
            "status" => Some(match self.status {
                DispatchStatus::Success => "SUCCESS".into(),
                DispatchStatus::Failed => "FAILED".into(),
            }),
            "status_code" => Some(FieldValue::Int(i64::from(self.status_code))),
            "retry_attempts" => Some(FieldValue::Int(i64::from(self.retry_attempts))),
            "response_body" => Some(self.response_body.as_str().into()),
            "completed_at" => Some(self.completed_at.into()),
            "execution_time_ms" => {
                Some(FieldValue::Int(i64::try_from(self.execution_time_ms).unwrap_or(i64::MAX)))
            }
            _ => None,
        }
    }
}
