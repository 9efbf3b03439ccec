//! Shared type definitions for the Transflow traffic analyzer.
//!
//! This crate is the single source of truth for the snapshot shapes that
//! the traffic simulation publishes on the bus and that the query API
//! serves back out. Types flow downstream to `TypeScript` via `ts-rs` for
//! the visual front end.
//!
//! # Modules
//!
//! - [`domain`] -- The closed set of entity kinds carried in bus topics
//! - [`entities`] -- Per-kind snapshot structs (vehicles, edges, lanes, ...)
//! - [`snapshot`] -- The [`TimeSeriesEntity`] trait and the [`Snapshot`] variant

pub mod domain;
pub mod entities;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use domain::Domain;
pub use entities::{Edge, Junction, Lane, Link, Position, Route, Vehicle, VehicleType};
pub use snapshot::{Snapshot, TimeSeriesEntity};
