//! REST API endpoint handlers.
//!
//! All handlers read through the [`QueryFacade`](transflow_store::QueryFacade)
//! held in the shared [`AppState`]. Absent data is an empty list or `null`;
//! malformed parameters are rejected with [`ApiError`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/status` | Ingest counters and start time |
//! | `GET` | `/api/simulations` | Known simulation ids |
//! | `GET` | `/api/simulations/:sim/vehicles` | Vehicles with their type ids |
//! | `GET` | `/api/simulations/:sim/vehicle-types` | Vehicle type ids |
//! | `GET` | `/api/simulations/:sim/vehicle-types/:id` | Earliest vehicle type snapshot |
//! | `GET` | `/api/simulations/:sim/vehicles/:id/series` | Full vehicle series |
//! | `GET` | `/api/simulations/:sim/vehicles/:id/at/:t` | Vehicle snapshot at a time step |
//! | `GET` | `/api/simulations/:sim/vehicles/:id/range` | Vehicle snapshots in `from..=to` |
//! | `GET` | `/api/simulations/:sim/domains/:domain` | Entity ids of a domain |
//! | `GET` | `/api/simulations/:sim/domains/:domain/first` | Earliest snapshot of each entity |
//! | `GET` | `/api/simulations/:sim/domains/:domain/:id` | Full entity series |
//! | `GET` | `/api/simulations/:sim/domains/:domain/:id/at/:t` | Entity snapshot at a time step |
//! | `GET` | `/api/simulations/:sim/domains/:domain/:id/range` | Entity snapshots in `from..=to` |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use transflow_store::{IngestCounts, VehicleKey};
use transflow_types::{Domain, Snapshot, Vehicle, VehicleType};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Parameters and responses
// ---------------------------------------------------------------------------

/// Query parameters for the range endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// Inclusive lower bound; unbounded when absent.
    pub from: Option<i64>,
    /// Inclusive upper bound; unbounded when absent.
    pub to: Option<i64>,
}

impl RangeQuery {
    /// The inclusive `(from, to)` window, with absent bounds open.
    pub fn bounds(&self) -> (i64, i64) {
        (self.from.unwrap_or(i64::MIN), self.to.unwrap_or(i64::MAX))
    }
}

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Number of simulations with at least one stored snapshot.
    pub simulations: usize,
    /// When the service started.
    pub started_at: DateTime<Utc>,
    /// Dispatcher counters.
    pub ingest: IngestCounts,
}

/// Unwrap an extractor result, turning its rejection into an [`ApiError`].
fn accept<T, R>(extracted: Result<T, R>) -> Result<T, ApiError>
where
    ApiError: From<R>,
{
    extracted.map_err(ApiError::from)
}

/// Resolve a `{domain}` path segment. Hyphens are accepted in place of
/// underscores (`vehicle-types`).
fn parse_domain(tag: &str) -> Result<Domain, ApiError> {
    Domain::from_tag(&tag.replace('-', "_")).ok_or_else(|| ApiError::UnknownDomain(tag.to_owned()))
}

// ---------------------------------------------------------------------------
// Status and simulations
// ---------------------------------------------------------------------------

/// Report ingest counters, simulation count and start time.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        simulations: state.query.registry().len(),
        started_at: state.started_at,
        ingest: state.stats.counts(),
    })
}

/// List every known simulation id, sorted.
pub async fn list_simulations(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.query.list_simulations())
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// List the vehicles of a simulation with their vehicle type ids.
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Path(simulation_id): Path<String>,
) -> Json<Vec<VehicleKey>> {
    Json(state.query.list_vehicles(&simulation_id))
}

/// List the vehicle type ids of a simulation.
pub async fn list_vehicle_types(
    State(state): State<Arc<AppState>>,
    Path(simulation_id): Path<String>,
) -> Json<Vec<String>> {
    Json(state.query.list_vehicle_types(&simulation_id))
}

/// Return the earliest snapshot of a vehicle type, or `null`.
pub async fn get_vehicle_type(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, vehicle_type_id)): Path<(String, String)>,
) -> Json<Option<VehicleType>> {
    Json(
        state
            .query
            .get_vehicle_type_snapshot(&simulation_id, &vehicle_type_id),
    )
}

/// Return every snapshot of a vehicle, ascending by time step.
pub async fn get_vehicle_series(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, vehicle_id)): Path<(String, String)>,
) -> Json<Vec<Vehicle>> {
    Json(state.query.get_vehicle_series(&simulation_id, &vehicle_id))
}

/// Return the snapshot of a vehicle at exactly one time step, or `null`.
pub async fn get_vehicle_at(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String, i64)>, PathRejection>,
) -> Result<Json<Option<Vehicle>>, ApiError> {
    let Path((simulation_id, vehicle_id, time_step)) = accept(path)?;
    Ok(Json(
        state
            .query
            .get_vehicle_at(&simulation_id, &vehicle_id, time_step),
    ))
}

/// Return the snapshots of a vehicle within an inclusive time window.
///
/// # Query Parameters
///
/// - `from`: lower bound (default: unbounded)
/// - `to`: upper bound (default: unbounded)
pub async fn get_vehicle_range(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, vehicle_id)): Path<(String, String)>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let Query(range) = accept(query)?;
    let (from, to) = range.bounds();
    Ok(Json(
        state
            .query
            .get_vehicle_range(&simulation_id, &vehicle_id, from, to),
    ))
}

// ---------------------------------------------------------------------------
// Any domain
// ---------------------------------------------------------------------------

/// List the entity ids of one domain.
pub async fn list_domain_entities(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, tag)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, ApiError> {
    let domain = parse_domain(&tag)?;
    Ok(Json(state.query.domain_entities(&simulation_id, domain)))
}

/// Return the earliest snapshot of every entity of one domain.
pub async fn list_domain_first_snapshots(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, tag)): Path<(String, String)>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    let domain = parse_domain(&tag)?;
    Ok(Json(state.query.domain_first_snapshots(&simulation_id, domain)))
}

/// Return every snapshot of one entity, ascending by time step.
pub async fn get_domain_series(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, tag, id)): Path<(String, String, String)>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    let domain = parse_domain(&tag)?;
    Ok(Json(state.query.domain_series(&simulation_id, domain, &id)))
}

/// Return the snapshot of one entity at exactly one time step, or `null`.
pub async fn get_domain_snapshot(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String, String, i64)>, PathRejection>,
) -> Result<Json<Option<Snapshot>>, ApiError> {
    let Path((simulation_id, tag, id, time_step)) = accept(path)?;
    let domain = parse_domain(&tag)?;
    Ok(Json(
        state
            .query
            .domain_snapshot(&simulation_id, domain, &id, time_step),
    ))
}

/// Return the snapshots of one entity within an inclusive time window.
pub async fn get_domain_range(
    State(state): State<Arc<AppState>>,
    Path((simulation_id, tag, id)): Path<(String, String, String)>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    let domain = parse_domain(&tag)?;
    let Query(range) = accept(query)?;
    let (from, to) = range.bounds();
    Ok(Json(
        state
            .query
            .domain_range(&simulation_id, domain, &id, from, to),
    ))
}
