use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use hookline_core::{ConfigId, ConfigKind, ConfigRecord, DispatchLog, IngestRequest};
use hookline_store::{GatewayStore, StoreError};

/// Mode for injecting transient faults into store operations.
#[derive(Debug, Clone, Default)]
pub enum FailureMode {
    /// Never fail.
    #[default]
    None,
    /// Fail every N operations.
    EveryN(usize),
    /// Fail the first N operations.
    FirstN(usize),
    /// Fail with probability p (0.0 to 1.0).
    Probabilistic(f64),
    /// Always fail.
    Always,
}

/// In-memory [`GatewayStore`] standing in for the real backend.
///
/// Configuration collections live in a [`DashMap`] keyed by kind and keep
/// insertion order; the ingest and dispatch journals are append-only
/// vectors. An optional delay and [`FailureMode`] simulate the latency and
/// unavailability of a networked backend — a triggered fault surfaces as
/// [`StoreError::Transient`] before the operation touches any data.
pub struct MemoryGatewayStore {
    configs: DashMap<ConfigKind, Vec<ConfigRecord>>,
    requests: RwLock<Vec<IngestRequest>>,
    logs: RwLock<Vec<DispatchLog>>,
    delay: Option<Duration>,
    failure_mode: FailureMode,
    op_count: AtomicUsize,
    fault_rng: Mutex<StdRng>,
}

impl std::fmt::Debug for MemoryGatewayStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGatewayStore")
            .field("delay", &self.delay)
            .field("failure_mode", &self.failure_mode)
            .field("op_count", &self.op_count.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl MemoryGatewayStore {
    /// Create a new, empty store with no injected faults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configs: DashMap::new(),
            requests: RwLock::new(Vec::new()),
            logs: RwLock::new(Vec::new()),
            delay: None,
            failure_mode: FailureMode::None,
            op_count: AtomicUsize::new(0),
            fault_rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Sleep this long before every operation, simulating a round trip.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the failure injection mode.
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Seed the generator behind [`FailureMode::Probabilistic`] so fault
    /// sequences are reproducible in tests.
    #[must_use]
    pub fn with_fault_seed(self, seed: u64) -> Self {
        *self.fault_rng.lock() = StdRng::seed_from_u64(seed);
        self
    }

    /// Apply the configured delay and failure mode for one operation.
    async fn simulate_round_trip(&self) -> Result<(), StoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let op_number = self.op_count.fetch_add(1, Ordering::SeqCst) + 1;
        let fail = match &self.failure_mode {
            FailureMode::None => false,
            FailureMode::EveryN(n) => *n > 0 && op_number % n == 0,
            FailureMode::FirstN(n) => op_number <= *n,
            FailureMode::Probabilistic(p) => self.fault_rng.lock().gen_bool(p.clamp(0.0, 1.0)),
            FailureMode::Always => true,
        };

        if fail {
            return Err(StoreError::Transient(format!(
                "simulated outage on operation #{op_number}"
            )));
        }
        Ok(())
    }
}

impl Default for MemoryGatewayStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayStore for MemoryGatewayStore {
    async fn list_configs(&self, kind: ConfigKind) -> Result<Vec<ConfigRecord>, StoreError> {
        self.simulate_round_trip().await?;
        Ok(self.configs.get(&kind).map(|v| v.clone()).unwrap_or_default())
    }

    async fn create_config(&self, mut record: ConfigRecord) -> Result<ConfigRecord, StoreError> {
        self.simulate_round_trip().await?;

        let now = Utc::now();
        let mut collection = self.configs.entry(record.kind()).or_default();

        let meta = record.meta_mut();
        meta.id = ConfigId::new(Uuid::new_v4().to_string());
        meta.created_at = now;
        meta.updated_at = now;
        // The first record of each kind is the seeded baseline the console
        // depends on; it rejects deletion.
        meta.protected = collection.is_empty();

        collection.push(record.clone());
        Ok(record)
    }

    async fn update_config(&self, mut record: ConfigRecord) -> Result<ConfigRecord, StoreError> {
        self.simulate_round_trip().await?;

        let kind = record.kind();
        let mut collection = self
            .configs
            .get_mut(&kind)
            .ok_or_else(|| StoreError::NotFound(record.id().to_string()))?;

        let slot = collection
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| StoreError::NotFound(record.id().to_string()))?;

        // Identity, creation time, and protection are store-owned.
        let prior = slot.meta().clone();
        let meta = record.meta_mut();
        meta.created_at = prior.created_at;
        meta.protected = prior.protected;
        meta.updated_at = Utc::now();

        *slot = record.clone();
        Ok(record)
    }

    async fn delete_config(
        &self,
        kind: ConfigKind,
        id: &ConfigId,
    ) -> Result<ConfigRecord, StoreError> {
        self.simulate_round_trip().await?;

        let mut collection = self
            .configs
            .get_mut(&kind)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let index = collection
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if collection[index].protected() {
            return Err(StoreError::Protected(id.to_string()));
        }

        Ok(collection.remove(index))
    }

    async fn record_request(&self, request: IngestRequest) -> Result<(), StoreError> {
        self.simulate_round_trip().await?;
        self.requests.write().push(request);
        Ok(())
    }

    async fn list_requests(&self) -> Result<Vec<IngestRequest>, StoreError> {
        self.simulate_round_trip().await?;
        Ok(self.requests.read().clone())
    }

    async fn append_log(&self, log: DispatchLog) -> Result<(), StoreError> {
        self.simulate_round_trip().await?;
        self.logs.write().push(log);
        Ok(())
    }

    async fn list_logs(&self) -> Result<Vec<DispatchLog>, StoreError> {
        self.simulate_round_trip().await?;
        Ok(self.logs.read().clone())
    }
}
