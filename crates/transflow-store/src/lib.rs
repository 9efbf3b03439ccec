//! Ingestion routing and in-memory time-series storage.
//!
//! This crate is the core of the analyzer. Bus messages flow through it
//! leaf to root:
//!
//! ```text
//! topic + payload --> topic parser --> dispatcher --> registry --> bundle --> series store
//!                                                        ^
//!                                     query facade ------+  (concurrent reads)
//! ```
//!
//! # Modules
//!
//! - [`topic`] -- Parses `sim/<simulationId>/metrics/<domain>/<timeStep>`
//! - [`decode`] -- Case-insensitive, forward-compatible payload decoding
//! - [`dispatch`] -- Routes a parsed message to its typed decoder and store
//! - [`series`] -- Per-kind store: entity id to time-ordered snapshots
//! - [`bundle`] -- All per-kind stores of one simulation run
//! - [`registry`] -- Simulation id to bundle, created on first use
//! - [`query`] -- Read-only query surface used by the API adapter
//! - [`stats`] -- Ingestion counters
//!
//! # Concurrency
//!
//! Every level is safe to share across threads. Get-or-create at the
//! registry and series level goes through [`dashmap`]'s entry API so
//! concurrent first touches yield one instance. Each series carries its
//! own lock, so inserts for different entities never contend and a reader
//! never observes a half-inserted snapshot.

pub mod bundle;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod query;
pub mod registry;
pub mod series;
pub mod stats;
pub mod topic;

// Re-export primary types for convenience.
pub use bundle::{SimulationBundle, StoredEntity};
pub use dispatch::{Dispatcher, Ingested};
pub use error::{DecodeError, IngestError, TopicParseError};
pub use query::{QueryFacade, VehicleKey};
pub use registry::SimulationRegistry;
pub use series::{Series, SeriesStore};
pub use stats::{IngestCounts, IngestStats};
pub use topic::{SimDataTopic, TopicLayout};
