use std::sync::Arc;

use parking_lot::Mutex;

use hookline_dispatch::DispatchSimulator;
use hookline_store::GatewayStore;

use crate::error::GatewayError;
use crate::gateway::ConsoleGateway;

/// Fluent builder for constructing a [`ConsoleGateway`].
///
/// A [`GatewayStore`] implementation must be supplied; the dispatch
/// simulator defaults to an entropy seed unless a fixed one is given.
pub struct ConsoleGatewayBuilder {
    store: Option<Arc<dyn GatewayStore>>,
    simulator_seed: Option<u64>,
}

impl ConsoleGatewayBuilder {
    /// Create a new builder with no store and an entropy-seeded simulator.
    pub fn new() -> Self {
        Self {
            store: None,
            simulator_seed: None,
        }
    }

    /// Set the backing store implementation.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn GatewayStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Fix the dispatch simulator's seed so outcomes are reproducible.
    #[must_use]
    pub fn simulator_seed(mut self, seed: u64) -> Self {
        self.simulator_seed = Some(seed);
        self
    }

    /// Consume the builder and produce a configured [`ConsoleGateway`].
    ///
    /// Returns [`GatewayError::Configuration`] if no store has been set.
    pub fn build(self) -> Result<ConsoleGateway, GatewayError> {
        let store = self
            .store
            .ok_or_else(|| GatewayError::Configuration("store is required".into()))?;

        let simulator = match self.simulator_seed {
            Some(seed) => DispatchSimulator::from_seed(seed),
            None => DispatchSimulator::from_entropy(),
        };

        Ok(ConsoleGateway {
            store,
            simulator: Mutex::new(simulator),
        })
    }
}

impl Default for ConsoleGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookline_store_memory::MemoryGatewayStore;

    #[test]
    fn build_missing_store_returns_error() {
        let result = ConsoleGatewayBuilder::new().build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("store is required"));
    }

    #[test]
    fn build_with_store_succeeds() {
        let store = Arc::new(MemoryGatewayStore::new());
        let result = ConsoleGatewayBuilder::new().store(store).build();
        assert!(result.is_ok());
    }
}
