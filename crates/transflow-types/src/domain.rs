//! The closed set of entity kinds published by the traffic simulation.
//!
//! Every bus topic carries exactly one domain tag. The tag selects the
//! decoder and the per-kind store a payload is routed to, so the set is
//! fixed at compile time rather than looked up by runtime type.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An entity kind carried in a bus topic.
///
/// Serialized using the canonical topic tag (`vehicles`, `vehicle_types`,
/// `edges`, `lanes`, `junctions`, `routes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Domain {
    /// Moving vehicles.
    Vehicles,
    /// Vehicle type definitions (dimensions, limits, emission class).
    VehicleTypes,
    /// Road edges.
    Edges,
    /// Individual lanes of an edge.
    Lanes,
    /// Road junctions.
    Junctions,
    /// Driving routes.
    Routes,
}

impl Domain {
    /// Every domain, in topic-tag order.
    pub const ALL: [Self; 6] = [
        Self::Vehicles,
        Self::VehicleTypes,
        Self::Edges,
        Self::Lanes,
        Self::Junctions,
        Self::Routes,
    ];

    /// Resolve a topic domain tag.
    ///
    /// Matching is case-insensitive and ignores underscores, so
    /// `vehicle_types`, `VehicleTypes` and `VEHICLETYPES` all resolve to
    /// [`Domain::VehicleTypes`]. Returns `None` for anything outside the
    /// closed set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "vehicles" => Some(Self::Vehicles),
            "vehicletypes" => Some(Self::VehicleTypes),
            "edges" => Some(Self::Edges),
            "lanes" => Some(Self::Lanes),
            "junctions" => Some(Self::Junctions),
            "routes" => Some(Self::Routes),
            _ => None,
        }
    }

    /// The canonical topic tag for this domain.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::VehicleTypes => "vehicle_types",
            Self::Edges => "edges",
            Self::Lanes => "lanes",
            Self::Junctions => "junctions",
            Self::Routes => "routes",
        }
    }
}

impl core::fmt::Display for Domain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_tag())
    }
}
