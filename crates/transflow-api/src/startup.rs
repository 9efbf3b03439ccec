//! API server startup helper for embedding in the analyzer binary.
//!
//! Provides [`spawn_api`] which launches the HTTP server on a background
//! Tokio task so it runs concurrently with the bus consumers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use transflow_api::{AppState, ServerConfig, spawn_api};
//!
//! let state = Arc::new(AppState::new(&dispatcher));
//! let handle = spawn_api(ServerConfig::default(), state, shutdown)?;
//! // ... on shutdown, resolve `shutdown` and await `handle`.
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Spawn the API server on a background Tokio task.
///
/// The address is validated before the task is spawned, so obvious
/// misconfigurations surface to the caller. Bind and serve failures
/// inside the task are logged.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the configured address does not parse.
pub fn spawn_api<F>(
    config: ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<JoinHandle<()>, ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state, shutdown).await {
            tracing::error!(error = %e, "API server exited with error");
        }
    });

    tracing::info!(%addr, "API server spawned on background task");

    Ok(handle)
}
