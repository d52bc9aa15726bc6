use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use hookline_core::{
    ConfigId, ConfigKind, ConfigRecord, DispatchLog, DispatchRule, IngestRequest,
};
use hookline_dispatch::DispatchSimulator;
use hookline_rules::{compile_pattern, first_match};
use hookline_stats::{aggregate, hourly_histogram, DashboardStats, HourlyBucket};
use hookline_store::GatewayStore;
use hookline_view::{view, TablePage, TableQuery};

use crate::error::GatewayError;

/// The console gateway: one entry point composing the store, the rule
/// matcher, the dispatch simulator, and the view/stat derivations.
///
/// The ingest pipeline for each captured request:
/// 1. Append the request to the ingest journal.
/// 2. Scan the active dispatch rules for the first pattern match.
/// 3. On a match, simulate the delivery and append the dispatch log.
pub struct ConsoleGateway {
    pub(crate) store: Arc<dyn GatewayStore>,
    pub(crate) simulator: Mutex<DispatchSimulator>,
}

impl std::fmt::Debug for ConsoleGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleGateway").finish_non_exhaustive()
    }
}

impl ConsoleGateway {
    /// Run one captured request through the full ingest pipeline.
    ///
    /// Returns the dispatch log when a rule matched, `None` otherwise.
    /// Rules with invalid patterns are skipped with a warning and never
    /// abort the scan.
    #[instrument(skip(self, request), fields(request.id = %request.id, request.url = %request.url))]
    pub async fn ingest(
        &self,
        request: IngestRequest,
    ) -> Result<Option<DispatchLog>, GatewayError> {
        self.store.record_request(request.clone()).await?;

        let rules = self.dispatch_rules().await?;
        let outcome = first_match(&request.url, &rules);
        for diagnostic in &outcome.diagnostics {
            warn!(
                rule = %diagnostic.rule_name,
                error = %diagnostic.error,
                "dispatch rule skipped during match"
            );
        }

        let Some(rule) = outcome.rule else {
            info!("no dispatch rule matched");
            return Ok(None);
        };

        let log = self.simulator.lock().simulate(&request, rule);
        self.store.append_log(log.clone()).await?;
        info!(rule = %log.rule_name, status = ?log.status, "dispatch simulated");
        Ok(Some(log))
    }

    /// Dashboard counters over the current collections.
    pub async fn stats(&self) -> Result<DashboardStats, GatewayError> {
        let requests = self.store.list_requests().await?;
        let logs = self.store.list_logs().await?;
        let webhooks = self.store.list_configs(ConfigKind::WebhookConfig).await?;
        Ok(aggregate(&requests, &logs, &webhooks))
    }

    /// Ingest volume per hour over the trailing 24 hours ending at `now`.
    pub async fn histogram(&self, now: DateTime<Utc>) -> Result<Vec<HourlyBucket>, GatewayError> {
        let requests = self.store.list_requests().await?;
        Ok(hourly_histogram(&requests, now))
    }

    /// One table page over the ingest journal.
    pub async fn requests_page(
        &self,
        query: &TableQuery,
    ) -> Result<TablePage<IngestRequest>, GatewayError> {
        let requests = self.store.list_requests().await?;
        Ok(view(&requests, query))
    }

    /// One table page over the dispatch journal.
    pub async fn logs_page(
        &self,
        query: &TableQuery,
    ) -> Result<TablePage<DispatchLog>, GatewayError> {
        let logs = self.store.list_logs().await?;
        Ok(view(&logs, query))
    }

    /// One table page over a configuration collection.
    pub async fn configs_page(
        &self,
        kind: ConfigKind,
        query: &TableQuery,
    ) -> Result<TablePage<ConfigRecord>, GatewayError> {
        let configs = self.store.list_configs(kind).await?;
        Ok(view(&configs, query))
    }

    /// List one configuration collection.
    pub async fn list_configs(&self, kind: ConfigKind) -> Result<Vec<ConfigRecord>, GatewayError> {
        Ok(self.store.list_configs(kind).await?)
    }

    /// Create a configuration record.
    ///
    /// Dispatch-rule patterns are validated up front so an unparseable
    /// pattern is rejected here instead of silently never matching.
    pub async fn create_config(
        &self,
        record: ConfigRecord,
    ) -> Result<ConfigRecord, GatewayError> {
        validate_record(&record)?;
        Ok(self.store.create_config(record).await?)
    }

    /// Update a configuration record. Pattern validation as for create.
    pub async fn update_config(
        &self,
        record: ConfigRecord,
    ) -> Result<ConfigRecord, GatewayError> {
        validate_record(&record)?;
        Ok(self.store.update_config(record).await?)
    }

    /// Delete a configuration record by kind and id.
    pub async fn delete_config(
        &self,
        kind: ConfigKind,
        id: &ConfigId,
    ) -> Result<ConfigRecord, GatewayError> {
        Ok(self.store.delete_config(kind, id).await?)
    }

    async fn dispatch_rules(&self) -> Result<Vec<DispatchRule>, GatewayError> {
        let records = self.store.list_configs(ConfigKind::DispatchRule).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| record.as_dispatch_rule().cloned())
            .collect())
    }
}

fn validate_record(record: &ConfigRecord) -> Result<(), GatewayError> {
    if let Some(rule) = record.as_dispatch_rule() {
        compile_pattern(rule)?;
    }
    Ok(())
}
