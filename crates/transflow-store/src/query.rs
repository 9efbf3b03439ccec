//! Read-only query surface over the registry.
//!
//! [`QueryFacade`] is what the API adapter calls. Every query is total:
//! an unknown simulation, entity id or time step yields an empty list or
//! `None`, never an error. Queries never register a simulation.
//!
//! Two flavours are offered. The generic methods take the snapshot kind as
//! a type parameter; the `domain_*` methods take a runtime [`Domain`] and
//! return [`Snapshot`] values, for callers that receive the kind as data.

use std::sync::Arc;

use serde::Serialize;
use transflow_types::{Domain, Edge, Junction, Lane, Route, Snapshot, Vehicle, VehicleType};

use crate::bundle::{SimulationBundle, StoredEntity};
use crate::registry::SimulationRegistry;

/// Run `$body` with `$ty` aliased to the snapshot type of `$domain`.
macro_rules! with_domain_type {
    ($domain:expr, $ty:ident => $body:expr) => {
        match $domain {
            Domain::Vehicles => {
                type $ty = Vehicle;
                $body
            }
            Domain::VehicleTypes => {
                type $ty = VehicleType;
                $body
            }
            Domain::Edges => {
                type $ty = Edge;
                $body
            }
            Domain::Lanes => {
                type $ty = Lane;
                $body
            }
            Domain::Junctions => {
                type $ty = Junction;
                $body
            }
            Domain::Routes => {
                type $ty = Route;
                $body
            }
        }
    };
}

/// A vehicle paired with its vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleKey {
    /// Vehicle identifier.
    pub id: String,
    /// Type identifier, as reported in the vehicle's earliest snapshot.
    pub vehicle_type_id: Option<String>,
}

/// Read operations over a shared [`SimulationRegistry`].
#[derive(Debug, Clone)]
pub struct QueryFacade {
    registry: Arc<SimulationRegistry>,
}

impl QueryFacade {
    /// Create a facade reading from `registry`.
    pub const fn new(registry: Arc<SimulationRegistry>) -> Self {
        Self { registry }
    }

    /// The registry being read.
    pub const fn registry(&self) -> &Arc<SimulationRegistry> {
        &self.registry
    }

    fn bundle(&self, simulation_id: &str) -> Option<Arc<SimulationBundle>> {
        self.registry.bundle(simulation_id)
    }

    // -----------------------------------------------------------------------
    // Generic queries
    // -----------------------------------------------------------------------

    /// Every known simulation id, sorted.
    pub fn list_simulations(&self) -> Vec<String> {
        self.registry.list_simulation_ids().into_iter().collect()
    }

    /// Every entity id of kind `T` in a simulation, sorted.
    pub fn list_entities<T: StoredEntity>(&self, simulation_id: &str) -> Vec<String> {
        self.bundle(simulation_id)
            .map(|bundle| bundle.store::<T>().keys().into_iter().collect())
            .unwrap_or_default()
    }

    /// The earliest snapshot of every entity of kind `T`, ordered by id.
    pub fn list_entities_with_first_snapshot<T: StoredEntity>(
        &self,
        simulation_id: &str,
    ) -> Vec<T> {
        self.bundle(simulation_id)
            .map(|bundle| bundle.store::<T>().first_snapshot_of_each())
            .unwrap_or_default()
    }

    /// The snapshot of `id` taken exactly at `time_step`.
    pub fn get_snapshot<T: StoredEntity>(
        &self,
        simulation_id: &str,
        id: &str,
        time_step: i64,
    ) -> Option<T> {
        self.bundle(simulation_id)
            .and_then(|bundle| bundle.store::<T>().get_at_point(id, time_step))
    }

    /// Every snapshot of `id`, ascending.
    pub fn get_series<T: StoredEntity>(&self, simulation_id: &str, id: &str) -> Vec<T> {
        self.bundle(simulation_id)
            .map(|bundle| bundle.store::<T>().get_full_series(id))
            .unwrap_or_default()
    }

    /// Snapshots of `id` with `from <= time_step <= to`, ascending.
    pub fn get_range<T: StoredEntity>(
        &self,
        simulation_id: &str,
        id: &str,
        from: i64,
        to: i64,
    ) -> Vec<T> {
        self.bundle(simulation_id)
            .map(|bundle| bundle.store::<T>().get_in_range(id, from, to))
            .unwrap_or_default()
    }

    /// The earliest snapshot of `id`.
    pub fn get_first<T: StoredEntity>(&self, simulation_id: &str, id: &str) -> Option<T> {
        self.bundle(simulation_id)
            .and_then(|bundle| bundle.store::<T>().series(id))
            .and_then(|series| series.first())
    }

    // -----------------------------------------------------------------------
    // Runtime-domain queries
    // -----------------------------------------------------------------------

    /// Every entity id of `domain` in a simulation, sorted.
    pub fn domain_entities(&self, simulation_id: &str, domain: Domain) -> Vec<String> {
        with_domain_type!(domain, T => self.list_entities::<T>(simulation_id))
    }

    /// The earliest snapshot of every entity of `domain`, ordered by id.
    pub fn domain_first_snapshots(&self, simulation_id: &str, domain: Domain) -> Vec<Snapshot> {
        with_domain_type!(domain, T => into_snapshots(
            self.list_entities_with_first_snapshot::<T>(simulation_id)
        ))
    }

    /// The snapshot of `id` in `domain` taken exactly at `time_step`.
    pub fn domain_snapshot(
        &self,
        simulation_id: &str,
        domain: Domain,
        id: &str,
        time_step: i64,
    ) -> Option<Snapshot> {
        with_domain_type!(domain, T => self
            .get_snapshot::<T>(simulation_id, id, time_step)
            .map(Snapshot::from))
    }

    /// Every snapshot of `id` in `domain`, ascending.
    pub fn domain_series(&self, simulation_id: &str, domain: Domain, id: &str) -> Vec<Snapshot> {
        with_domain_type!(domain, T => into_snapshots(self.get_series::<T>(simulation_id, id)))
    }

    /// Snapshots of `id` in `domain` with `from <= time_step <= to`, ascending.
    pub fn domain_range(
        &self,
        simulation_id: &str,
        domain: Domain,
        id: &str,
        from: i64,
        to: i64,
    ) -> Vec<Snapshot> {
        with_domain_type!(domain, T => into_snapshots(
            self.get_range::<T>(simulation_id, id, from, to)
        ))
    }

    // -----------------------------------------------------------------------
    // Vehicle queries
    // -----------------------------------------------------------------------

    /// Every vehicle with the type id from its earliest snapshot.
    pub fn list_vehicles(&self, simulation_id: &str) -> Vec<VehicleKey> {
        self.list_entities_with_first_snapshot::<Vehicle>(simulation_id)
            .into_iter()
            .map(|vehicle| VehicleKey {
                id: vehicle.id,
                vehicle_type_id: vehicle.vehicle_type_id,
            })
            .collect()
    }

    /// Every vehicle type id.
    pub fn list_vehicle_types(&self, simulation_id: &str) -> Vec<String> {
        self.list_entities::<VehicleType>(simulation_id)
    }

    /// Every snapshot of a vehicle, ascending.
    pub fn get_vehicle_series(&self, simulation_id: &str, vehicle_id: &str) -> Vec<Vehicle> {
        self.get_series(simulation_id, vehicle_id)
    }

    /// The snapshot of a vehicle taken exactly at `time_step`.
    pub fn get_vehicle_at(
        &self,
        simulation_id: &str,
        vehicle_id: &str,
        time_step: i64,
    ) -> Option<Vehicle> {
        self.get_snapshot(simulation_id, vehicle_id, time_step)
    }

    /// Snapshots of a vehicle with `from <= time_step <= to`, ascending.
    pub fn get_vehicle_range(
        &self,
        simulation_id: &str,
        vehicle_id: &str,
        from: i64,
        to: i64,
    ) -> Vec<Vehicle> {
        self.get_range(simulation_id, vehicle_id, from, to)
    }

    /// The earliest snapshot of a vehicle type.
    pub fn get_vehicle_type_snapshot(
        &self,
        simulation_id: &str,
        vehicle_type_id: &str,
    ) -> Option<VehicleType> {
        self.get_first(simulation_id, vehicle_type_id)
    }
}

fn into_snapshots<T: Into<Snapshot>>(snapshots: Vec<T>) -> Vec<Snapshot> {
    snapshots.into_iter().map(Into::into).collect()
}
