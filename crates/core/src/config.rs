use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::{FieldValue, Tabular};
use crate::types::ConfigId;

/// Discriminator for the four configuration kinds managed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    /// DTO mappings: how an ingested payload is reshaped.
    DtoMapping,
    /// ETL pipelines: extraction, transformation, and load rules.
    EtlConfig,
    /// Dispatch rules: URL pattern to downstream target and delivery policy.
    DispatchRule,
    /// Webhook configs: per-provider inbound signature verification.
    WebhookConfig,
}

impl ConfigKind {
    /// All kinds, in the order the console presents them.
    pub const ALL: [Self; 4] = [
        Self::DtoMapping,
        Self::EtlConfig,
        Self::DispatchRule,
        Self::WebhookConfig,
    ];

    /// Human-readable label for the kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::DtoMapping => "DTO Mappings",
            Self::EtlConfig => "ETL Configs",
            Self::DispatchRule => "Dispatch Rules",
            Self::WebhookConfig => "Webhook Configs",
        }
    }
}

/// Fields shared by every configuration record.
///
/// `protected` replaces the positional "first record cannot be deleted" rule
/// with an explicit attribute; stores set it, delete checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMeta {
    /// Unique record identifier, assigned by the store on create.
    pub id: ConfigId,
    /// Whether the record participates in matching/processing.
    pub is_active: bool,
    /// Protected records reject deletion.
    #[serde(default)]
    pub protected: bool,
    /// When the record was created. Set once by the store.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated. Refreshed by the store on update.
    pub updated_at: DateTime<Utc>,
}

impl ConfigMeta {
    /// Meta for a draft record: empty id, zero timestamps, active.
    ///
    /// The store fills in id and timestamps on create.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: ConfigId::new(""),
            is_active: true,
            protected: false,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        }
    }
}

/// Configuration for reshaping an ingested payload into a target DTO.
///
/// The rule payload fields hold raw JSON text the core never parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtoMapping {
    #[serde(flatten)]
    pub meta: ConfigMeta,
    pub name: String,
    /// Regex source matched against request URLs to select this mapping.
    pub source_pattern: String,
    /// Opaque JSON text describing the target shape.
    pub target_schema: String,
    /// Opaque JSON text describing field-level transformations.
    pub transformation_rules: String,
}

/// An ETL pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    #[serde(flatten)]
    pub meta: ConfigMeta,
    pub name: String,
    pub source_dto: String,
    pub target_format: String,
    /// Opaque JSON text.
    pub extraction_rules: String,
    /// Opaque JSON text.
    pub transformation_rules: String,
    /// Opaque JSON text.
    pub load_rules: String,
}

/// Maps a URL pattern to a downstream target and delivery policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRule {
    #[serde(flatten)]
    pub meta: ConfigMeta,
    pub name: String,
    /// Regex source tested against the ingest request URL.
    pub pattern: String,
    pub target_url: String,
    pub method: String,
    /// Opaque JSON text of headers to send downstream.
    pub headers: String,
    /// Retry budget for failed deliveries.
    pub retry_count: u32,
    /// Delivery timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Per-provider inbound signature verification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(flatten)]
    pub meta: ConfigMeta,
    pub provider: String,
    pub secret: String,
    pub signature_header: String,
    pub algorithm: String,
}

/// A configuration record of any kind.
///
/// Tagged variant rather than one shared record with optional fields: the
/// store and the table-view engine only need the common surface exposed by
/// the accessors below and never look inside a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigRecord {
    DtoMapping(DtoMapping),
    EtlConfig(EtlConfig),
    DispatchRule(DispatchRule),
    WebhookConfig(WebhookConfig),
}

impl ConfigRecord {
    /// The record's kind discriminator.
    pub fn kind(&self) -> ConfigKind {
        match self {
            Self::DtoMapping(_) => ConfigKind::DtoMapping,
            Self::EtlConfig(_) => ConfigKind::EtlConfig,
            Self::DispatchRule(_) => ConfigKind::DispatchRule,
            Self::WebhookConfig(_) => ConfigKind::WebhookConfig,
        }
    }

    /// Shared metadata, immutable view.
    pub fn meta(&self) -> &ConfigMeta {
        match self {
            Self::DtoMapping(c) => &c.meta,
            Self::EtlConfig(c) => &c.meta,
            Self::DispatchRule(c) => &c.meta,
            Self::WebhookConfig(c) => &c.meta,
        }
    }

    /// Shared metadata, mutable view. Used by stores when assigning
    /// identity and refreshing timestamps.
    pub fn meta_mut(&mut self) -> &mut ConfigMeta {
        match self {
            Self::DtoMapping(c) => &mut c.meta,
            Self::EtlConfig(c) => &mut c.meta,
            Self::DispatchRule(c) => &mut c.meta,
            Self::WebhookConfig(c) => &mut c.meta,
        }
    }

    /// The record's unique id.
    pub fn id(&self) -> &ConfigId {
        &self.meta().id
    }

    /// Display name of the record (provider name for webhook configs).
    pub fn name(&self) -> &str {
        match self {
            Self::DtoMapping(c) => &c.name,
            Self::EtlConfig(c) => &c.name,
            Self::DispatchRule(c) => &c.name,
            Self::WebhookConfig(c) => &c.provider,
        }
    }

    /// Whether the record participates in matching/processing.
    pub fn is_active(&self) -> bool {
        self.meta().is_active
    }

    /// Whether the record rejects deletion.
    pub fn protected(&self) -> bool {
        self.meta().protected
    }

    /// Borrow the dispatch rule payload, if this record is one.
    pub fn as_dispatch_rule(&self) -> Option<&DispatchRule> {
        match self {
            Self::DispatchRule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Borrow the webhook config payload, if this record is one.
    pub fn as_webhook_config(&self) -> Option<&WebhookConfig> {
        match self {
            Self::WebhookConfig(config) => Some(config),
            _ => None,
        }
    }
}

impl Tabular for ConfigRecord {
    fn id(&self) -> &str {
        self.meta().id.as_str()
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        // Common fields first, then kind-specific ones.
        match key {
            "id" => return Some(self.meta().id.as_str().into()),
            "name" => return Some(self.name().into()),
            "is_active" => return Some(self.meta().is_active.into()),
            "protected" => return Some(self.meta().protected.into()),
            "created_at" => return Some(self.meta().created_at.into()),
            "updated_at" => return Some(self.meta().updated_at.into()),
            _ => {}
        }

        match self {
            Self::DtoMapping(c) => match key {
                "source_pattern" => Some(c.source_pattern.as_str().into()),
                "target_schema" => Some(c.target_schema.as_str().into()),
                "transformation_rules" => Some(c.transformation_rules.as_str().into()),
                _ => None,
            },
            Self::EtlConfig(c) => match key {
                "source_dto" => Some(c.source_dto.as_str().into()),
                "target_format" => Some(c.target_format.as_str().into()),
                "extraction_rules" => Some(c.extraction_rules.as_str().into()),
                "transformation_rules" => Some(c.transformation_rules.as_str().into()),
                "load_rules" => Some(c.load_rules.as_str().into()),
                _ => None,
            },
            Self::DispatchRule(c) => match key {
                "pattern" => Some(c.pattern.as_str().into()),
                "target_url" => Some(c.target_url.as_str().into()),
                "method" => Some(c.method.as_str().into()),
                "headers" => Some(c.headers.as_str().into()),
                "retry_count" => Some(FieldValue::Int(i64::from(c.retry_count))),
                "timeout_ms" => {
                    Some(FieldValue::Int(i64::try_from(c.timeout_ms).unwrap_or(i64::MAX)))
                }
                _ => None,
            },
            Self::WebhookConfig(c) => match key {
                "provider" => Some(c.provider.as_str().into()),
                "signature_header" => Some(c.signature_header.as_str().into()),
                "algorithm" => Some(c.algorithm.as_str().into()),
                _ => None,
            },
        }
    }
}
