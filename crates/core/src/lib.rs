pub mod config;
pub mod field;
pub mod log;
pub mod request;
pub mod types;

pub use config::{
    ConfigKind, ConfigRecord, DispatchRule, DtoMapping, EtlConfig, WebhookConfig,
};
pub use field::{FieldValue, Tabular};
pub use log::{DispatchLog, DispatchStatus};
pub use request::IngestRequest;
pub use types::{ConfigId, LogId, RequestId};
