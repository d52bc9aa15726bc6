//! Seeded demo data for the console: the collections a freshly installed
//! gateway would show, derived deterministically from one seed.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use hookline_core::config::{ConfigMeta, DispatchRule, DtoMapping, EtlConfig, WebhookConfig};
use hookline_core::{ConfigKind, ConfigRecord, IngestRequest, RequestId};
use hookline_dispatch::DispatchSimulator;
use hookline_rules::first_match;
use hookline_store::{GatewayStore, StoreError};

const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
const RESOURCES: [&str; 4] = ["users", "products", "orders", "webhook/hubspot"];

/// Fifty sample ingest requests spread over the trailing 48 hours.
///
/// Ids, timing, and bodies all come from the seeded generator, so the same
/// seed reproduces the same collection.
pub fn demo_requests(seed: u64, now: DateTime<Utc>) -> Vec<IngestRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..50)
        .map(|i| {
            let age_minutes = rng.gen_range(0..48 * 60);
            let received_at = now - Duration::minutes(age_minutes);
            let mut request = IngestRequest::new(
                METHODS[i % METHODS.len()],
                format!(
                    "https://api.example.com/v1/{}/{i}",
                    RESOURCES[i % RESOURCES.len()]
                ),
                received_at,
            )
            .with_query_params(format!("?limit=10&offset={}", i * 10))
            .with_ip(format!("192.168.1.{i}"))
            .with_user_agent("MockClient/1.0")
            .with_body(format!(r#"{{"message": "sample body {i}"}}"#));
            request.headers.insert(
                "Content-Type".to_owned(),
                "application/json".to_owned(),
            );
            request.id = RequestId::new(Uuid::from_u128(rng.gen()).to_string());
            request
        })
        .collect()
}

/// The baseline configuration records, as drafts for the store to identify.
pub fn demo_configs() -> Vec<ConfigRecord> {
    vec![
        ConfigRecord::DtoMapping(DtoMapping {
            meta: ConfigMeta::draft(),
            name: "HubSpot Contact Mapping".into(),
            source_pattern: ".*webhook/hubspot.*".into(),
            target_schema: r#"{"contact_id": "string", "email": "string"}"#.into(),
            transformation_rules:
                r#"{"contact_id": "properties.hs_object_id", "email": "properties.email"}"#.into(),
        }),
        ConfigRecord::EtlConfig(EtlConfig {
            meta: ConfigMeta::draft(),
            name: "Contact Processing Pipeline".into(),
            source_dto: "hubspot_contact".into(),
            target_format: "crm_contact".into(),
            extraction_rules: r#"{"contact_info": "contact_id", "email_address": "email"}"#.into(),
            transformation_rules: r#"{"id": "contact_info", "email": "email_address"}"#.into(),
            load_rules: r#"{"destination": "crm_api", "format": "json"}"#.into(),
        }),
        ConfigRecord::DispatchRule(DispatchRule {
            meta: ConfigMeta::draft(),
            name: "Forward to CRM".into(),
            pattern: ".*webhook.*".into(),
            target_url: "https://downstream.crm.com/api/contacts".into(),
            method: "POST".into(),
            headers: r#"{"Authorization": "Bearer YOUR_API_KEY"}"#.into(),
            retry_count: 3,
            timeout_ms: 30_000,
        }),
        ConfigRecord::DispatchRule(DispatchRule {
            meta: {
                let mut meta = ConfigMeta::draft();
                meta.is_active = false;
                meta
            },
            name: "Log Analytics Events".into(),
            pattern: ".*analytics.*".into(),
            target_url: "https://downstream.analytics.com/events".into(),
            method: "POST".into(),
            headers: r#"{"X-API-KEY": "ANALYTICS_KEY"}"#.into(),
            retry_count: 1,
            timeout_ms: 15_000,
        }),
        ConfigRecord::WebhookConfig(WebhookConfig {
            meta: ConfigMeta::draft(),
            provider: "hubspot".into(),
            secret: "********".into(),
            signature_header: "X-HubSpot-Signature-v3".into(),
            algorithm: "SHA-256".into(),
        }),
    ]
}

/// Load the full demo dataset into a store.
///
/// Creates the baseline configs, records the sample requests, then derives
/// dispatch logs by running every request through the matcher and a seeded
/// simulator — so the seeded journals obey the same invariants as live
/// traffic (one log per matched request, active rules only).
pub async fn seed_demo_data<S: GatewayStore + ?Sized>(
    store: &S,
    seed: u64,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    for config in demo_configs() {
        store.create_config(config).await?;
    }

    let requests = demo_requests(seed, now);
    for request in &requests {
        store.record_request(request.clone()).await?;
    }

    let rules: Vec<_> = store
        .list_configs(ConfigKind::DispatchRule)
        .await?
        .into_iter()
        .filter_map(|record| record.as_dispatch_rule().cloned())
        .collect();

    let mut simulator = DispatchSimulator::from_seed(seed);
    for request in &requests {
        if let Some(rule) = first_match(&request.url, &rules).rule {
            store.append_log(simulator.simulate(request, rule)).await?;
        }
    }

    Ok(())
}
