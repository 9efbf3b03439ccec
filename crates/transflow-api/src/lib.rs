//! Query API server for the Transflow analyzer.
//!
//! This crate provides an Axum HTTP server that exposes the read side of
//! the snapshot store as JSON:
//!
//! - **Simulation listing** (`/api/simulations`)
//! - **Vehicle endpoints** for listing vehicles and vehicle types and for
//!   point, range and full-series lookups
//! - **Domain endpoints** that reach every entity kind through a
//!   `{domain}` path segment
//! - **Status** (`/api/status`) with ingest counters and uptime
//!
//! # Architecture
//!
//! Handlers call [`QueryFacade`] directly. Every query is total: unknown
//! simulations, entities or time steps produce an empty list or `null`,
//! never a 404. Only malformed path or query parameters are errors.
//!
//! [`QueryFacade`]: transflow_store::QueryFacade

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::spawn_api;
pub use state::AppState;
