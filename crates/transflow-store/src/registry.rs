//! The root of all in-memory state.
//!
//! [`SimulationRegistry`] maps simulation ids to their [`SimulationBundle`].
//! It is constructed once at startup and shared by reference count between
//! the ingestion path (writer) and the query path (readers). Bundles are
//! created on the first successfully ingested snapshot and live for the
//! rest of the process.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::bundle::SimulationBundle;

/// Simulation id to bundle map.
#[derive(Debug, Default)]
pub struct SimulationRegistry {
    bundles: DashMap<String, Arc<SimulationBundle>>,
}

impl SimulationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundle of `simulation_id`, created and registered if absent.
    ///
    /// Concurrent first touches of the same id yield the same bundle.
    pub fn get_or_create_bundle(&self, simulation_id: &str) -> Arc<SimulationBundle> {
        if let Some(existing) = self.bundle(simulation_id) {
            return existing;
        }

        let entry = self.bundles.entry(simulation_id.to_owned());
        let created = matches!(entry, dashmap::mapref::entry::Entry::Vacant(_));
        let bundle = Arc::clone(entry.or_default().value());
        if created {
            info!(simulation_id, "registered new simulation");
        }
        bundle
    }

    /// The bundle of `simulation_id`, without creating one.
    pub fn bundle(&self, simulation_id: &str) -> Option<Arc<SimulationBundle>> {
        self.bundles
            .get(simulation_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Every known simulation id at call time.
    pub fn list_simulation_ids(&self) -> BTreeSet<String> {
        self.bundles.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of known simulations.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no simulation has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
