//! Shared application state for the query API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use transflow_store::{Dispatcher, IngestStats, QueryFacade};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// facade and counters share their storage with the ingesting
/// [`Dispatcher`], so responses reflect every snapshot stored so far.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only queries over the simulation registry.
    pub query: QueryFacade,
    /// Ingest counters of the dispatcher feeding the registry.
    pub stats: Arc<IngestStats>,
    /// When the service started.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state reading from the registry `dispatcher` writes to.
    pub fn new(dispatcher: &Dispatcher) -> Self {
        Self {
            query: QueryFacade::new(Arc::clone(dispatcher.registry())),
            stats: Arc::clone(dispatcher.stats()),
            started_at: Utc::now(),
        }
    }
}
