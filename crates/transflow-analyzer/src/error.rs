//! Error types for the analyzer service.
//!
//! Every variant is fatal at startup: the process logs it and exits with
//! a non-zero status.

use transflow_api::ServerError;

use crate::config::ConfigError;

/// Errors that can occur while starting or running the analyzer.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to connect to the NATS server or to subscribe.
    #[error("NATS error: {0}")]
    Nats(String),

    /// The API server could not be started.
    #[error("API server error: {0}")]
    Server(#[from] ServerError),

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {0}")]
    Signal(#[from] std::io::Error),
}
