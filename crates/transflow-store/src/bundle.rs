//! The per-simulation bundle of typed stores.
//!
//! A [`SimulationBundle`] holds one [`SeriesStore`] per entity kind. The
//! mapping from snapshot type to its store is the single fixed table in
//! [`StoredEntity`], so no runtime type lookup is involved and every
//! store exists from the moment the bundle does.

use transflow_types::{
    Domain, Edge, Junction, Lane, Route, TimeSeriesEntity, Vehicle, VehicleType,
};

use crate::series::SeriesStore;

/// All per-kind stores of one simulation run.
#[derive(Debug, Default)]
pub struct SimulationBundle {
    vehicles: SeriesStore<Vehicle>,
    vehicle_types: SeriesStore<VehicleType>,
    edges: SeriesStore<Edge>,
    lanes: SeriesStore<Lane>,
    junctions: SeriesStore<Junction>,
    routes: SeriesStore<Route>,
}

/// A snapshot kind with a dedicated store in every [`SimulationBundle`].
pub trait StoredEntity: TimeSeriesEntity {
    /// The store holding this kind within `bundle`.
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self>;
}

impl StoredEntity for Vehicle {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.vehicles
    }
}

impl StoredEntity for VehicleType {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.vehicle_types
    }
}

impl StoredEntity for Edge {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.edges
    }
}

impl StoredEntity for Lane {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.lanes
    }
}

impl StoredEntity for Junction {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.junctions
    }
}

impl StoredEntity for Route {
    fn store(bundle: &SimulationBundle) -> &SeriesStore<Self> {
        &bundle.routes
    }
}

impl SimulationBundle {
    /// Create a bundle with an empty store for every kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for snapshot kind `T`.
    pub fn store<T: StoredEntity>(&self) -> &SeriesStore<T> {
        T::store(self)
    }

    /// Store a snapshot in the store for its kind.
    ///
    /// Returns the length of the entity's series after the insert.
    pub fn add<T: StoredEntity>(&self, snapshot: T) -> usize {
        self.store::<T>().add(snapshot)
    }

    /// Number of known entities of `domain`.
    pub fn entity_count(&self, domain: Domain) -> usize {
        match domain {
            Domain::Vehicles => self.vehicles.len(),
            Domain::VehicleTypes => self.vehicle_types.len(),
            Domain::Edges => self.edges.len(),
            Domain::Lanes => self.lanes.len(),
            Domain::Junctions => self.junctions.len(),
            Domain::Routes => self.routes.len(),
        }
    }
}
