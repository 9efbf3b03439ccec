//! The common shape shared by every snapshot kind.
//!
//! [`TimeSeriesEntity`] is the abstract snapshot: an identifier, a time
//! step, and a kind-specific payload. [`Snapshot`] is the closed tagged
//! variant used where the kind is only known at runtime (for example a
//! domain path segment in a query).

use serde::Serialize;
use ts_rs::TS;

use crate::domain::Domain;
use crate::entities::{Edge, Junction, Lane, Route, Vehicle, VehicleType};

/// A timestamped record of one entity's state.
///
/// Implemented by every per-kind snapshot struct. The store only needs the
/// identifier and the time step; everything else is opaque payload.
pub trait TimeSeriesEntity: Clone + Send + Sync + 'static {
    /// The domain this snapshot kind is published under.
    const DOMAIN: Domain;

    /// Stable identifier of the physical entity within a simulation run.
    fn id(&self) -> &str;

    /// Simulation time the snapshot was taken at.
    fn time_step(&self) -> i64;

    /// Overwrite the snapshot's time step.
    ///
    /// Used at ingestion: the time step in the bus topic is authoritative,
    /// whatever the payload body carries.
    fn set_time_step(&mut self, time_step: i64);
}

/// Implements [`TimeSeriesEntity`] and the [`Snapshot`] conversion for a
/// snapshot struct with `id` and `time_step` fields.
macro_rules! time_series_entity {
    ($ty:ident, $domain:ident) => {
        impl TimeSeriesEntity for $ty {
            const DOMAIN: Domain = Domain::$domain;

            fn id(&self) -> &str {
                &self.id
            }

            fn time_step(&self) -> i64 {
                self.time_step
            }

            fn set_time_step(&mut self, time_step: i64) {
                self.time_step = time_step;
            }
        }

        impl From<$ty> for Snapshot {
            fn from(snapshot: $ty) -> Self {
                Self::$ty(snapshot)
            }
        }
    };
}

time_series_entity!(Vehicle, Vehicles);
time_series_entity!(VehicleType, VehicleTypes);
time_series_entity!(Edge, Edges);
time_series_entity!(Lane, Lanes);
time_series_entity!(Junction, Junctions);
time_series_entity!(Route, Routes);

/// A snapshot of any kind.
///
/// Serialized untagged: the JSON is exactly the inner snapshot, since the
/// caller already knows which domain it asked for.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum Snapshot {
    /// A vehicle snapshot.
    Vehicle(Vehicle),
    /// A vehicle type snapshot.
    VehicleType(VehicleType),
    /// An edge snapshot.
    Edge(Edge),
    /// A lane snapshot.
    Lane(Lane),
    /// A junction snapshot.
    Junction(Junction),
    /// A route snapshot.
    Route(Route),
}

impl Snapshot {
    /// The domain of the wrapped snapshot.
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Vehicle(_) => Domain::Vehicles,
            Self::VehicleType(_) => Domain::VehicleTypes,
            Self::Edge(_) => Domain::Edges,
            Self::Lane(_) => Domain::Lanes,
            Self::Junction(_) => Domain::Junctions,
            Self::Route(_) => Domain::Routes,
        }
    }

    /// Identifier of the wrapped snapshot.
    pub fn id(&self) -> &str {
        match self {
            Self::Vehicle(s) => s.id(),
            Self::VehicleType(s) => s.id(),
            Self::Edge(s) => s.id(),
            Self::Lane(s) => s.id(),
            Self::Junction(s) => s.id(),
            Self::Route(s) => s.id(),
        }
    }

    /// Time step of the wrapped snapshot.
    pub fn time_step(&self) -> i64 {
        match self {
            Self::Vehicle(s) => s.time_step(),
            Self::VehicleType(s) => s.time_step(),
            Self::Edge(s) => s.time_step(),
            Self::Lane(s) => s.time_step(),
            Self::Junction(s) => s.time_step(),
            Self::Route(s) => s.time_step(),
        }
    }
}
