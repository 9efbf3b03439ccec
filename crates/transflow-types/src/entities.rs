//! Snapshot structs for every entity kind published by the simulation.
//!
//! Each struct mirrors one domain's payload: a stable `id`, the `time_step`
//! the snapshot was taken at, and a set of measurement fields. Payloads are
//! forward-compatible, so every measurement is optional or defaults to an
//! empty list and unknown fields are ignored on decode.
//!
//! Field names travel as `camelCase` on the wire.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in simulation network coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// X coordinate in metres.
    pub x: Option<f64>,
    /// Y coordinate in metres.
    pub y: Option<f64>,
    /// Z coordinate in metres (absent in 2D networks).
    pub z: Option<f64>,
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

/// State of a single vehicle at one simulation time step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Vehicle {
    /// Vehicle identifier, stable for the whole simulation run.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Display colour as `#RRGGBB`.
    pub hex_color: Option<String>,
    /// Identifier of the vehicle's type.
    pub vehicle_type_id: Option<String>,
    /// Length in metres.
    pub length: Option<f64>,
    /// Width in metres.
    pub width: Option<f64>,
    /// Height in metres.
    pub height: Option<f64>,
    /// Number of passenger seats.
    pub person_capacity: Option<u32>,
    /// Maximum speed in m/s.
    pub max_speed: Option<f64>,
    /// Maximum acceleration in m/s^2.
    pub max_acceleration: Option<f64>,
    /// Maximum deceleration in m/s^2.
    pub max_deceleration: Option<f64>,
    /// Multiplier applied to lane speed limits.
    pub speed_factor: Option<f64>,
    /// Deviation of the speed factor.
    pub speed_deviation: Option<f64>,
    /// Shape class used for rendering.
    pub shape_class: Option<String>,
    /// Driver reaction time in seconds.
    pub tau: Option<f64>,
    /// Driver imperfection (0 to 1).
    pub sigma: Option<f64>,
    /// Identifier of the route being driven.
    pub route_id: Option<String>,
    /// Minimum gap to the leader when standing, in metres.
    pub min_front_gap: Option<f64>,
    /// Minimum lateral gap in metres.
    pub min_lateral_gap: Option<f64>,
    /// Current speed in m/s.
    pub speed: Option<f64>,
    /// Current acceleration in m/s^2.
    pub acceleration: Option<f64>,
    /// Current lateral speed in m/s.
    pub lateral_speed: Option<f64>,
    /// Speed allowed on the current lane in m/s.
    pub allowed_speed: Option<f64>,
    /// Heading in degrees.
    pub angle: Option<f64>,
    /// Identifier of the edge currently driven on.
    pub road_id: Option<String>,
    /// Index of the current edge within the route.
    pub edge_in_route: Option<i32>,
    /// Index of the current lane within the edge.
    pub lane: Option<i32>,
    /// Current position.
    pub position: Option<Position>,
    /// Distance from the start of the current lane in metres.
    pub position_on_lane: Option<f64>,
    /// Lane change state bit set.
    pub lane_change_state: Option<i32>,
    /// Signal (indicator, brake light) bit set.
    pub signal_state: Option<i32>,
    /// Stop state bit set.
    pub stop_state: Option<i32>,
    /// Identifiers of persons on board.
    pub person_ids: Vec<String>,
    /// CO2 emission in mg/s.
    pub co2_mg_per_second: Option<f64>,
    /// Hydrocarbon emission in mg/s.
    pub hc_mg_per_second: Option<f64>,
    /// Particulate matter emission in mg/s.
    pub pmx_mg_per_second: Option<f64>,
    /// NOx emission in mg/s.
    pub nox_mg_per_second: Option<f64>,
    /// Fuel consumption in mg/s.
    pub fuel_consumption: Option<f64>,
    /// Electricity consumption in Wh/s.
    pub electricity_consumption: Option<f64>,
    /// Noise emission in dBA.
    pub noise_dba: Option<f64>,
    /// Distance driven since departure in metres.
    pub total_distance: Option<f64>,
    /// Accumulated waiting time in seconds.
    pub total_waiting_time: Option<f64>,
    /// Accumulated time loss in seconds.
    pub total_time_loss: Option<f64>,
    /// Time needed to board one person in seconds.
    pub boarding_duration: Option<f64>,
    /// Identifier of the vehicle ahead, if any.
    pub leader_vehicle_id: Option<String>,
    /// Distance to the vehicle ahead in metres.
    pub leader_vehicle_distance: Option<f64>,
}

// ---------------------------------------------------------------------------
// Vehicle type
// ---------------------------------------------------------------------------

/// A vehicle type definition. Effectively time-invariant within a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct VehicleType {
    /// Vehicle type identifier.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Abstract vehicle class (`passenger`, `bus`, ...).
    pub vehicle_class: Option<String>,
    /// Length in metres.
    pub length: Option<f64>,
    /// Width in metres.
    pub width: Option<f64>,
    /// Height in metres.
    pub height: Option<f64>,
    /// Outline polygon as a list of points.
    pub shape: Vec<Vec<f64>>,
    /// Display colour as `#RRGGBB`.
    pub hex_color: Option<String>,
    /// Maximum speed in m/s.
    pub max_speed: Option<f64>,
    /// Maximum lateral speed in m/s.
    pub max_speed_lateral: Option<f64>,
    /// Maximum acceleration in m/s^2.
    pub max_acceleration: Option<f64>,
    /// Maximum deceleration in m/s^2.
    pub max_deceleration: Option<f64>,
    /// Multiplier applied to lane speed limits.
    pub speed_factor: Option<f64>,
    /// Deviation of the speed factor.
    pub speed_deviation: Option<f64>,
    /// Emission model class.
    pub emission_class: Option<String>,
    /// Demand scaling factor.
    pub scale: Option<f64>,
    /// Driver reaction time in seconds.
    pub tau: Option<f64>,
    /// Driver imperfection (0 to 1).
    pub sigma: Option<f64>,
    /// Minimum gap to the leader when standing, in metres.
    pub min_gap: Option<f64>,
    /// Minimum lateral gap in metres.
    pub min_lateral_gap: Option<f64>,
    /// Preferred lateral alignment within the lane.
    pub lateral_alignment: Option<String>,
    /// Decision interval of the driver model in seconds.
    pub action_step_length: Option<f64>,
    /// Number of passenger seats.
    pub person_capacity: Option<u32>,
    /// Time needed to board one person in seconds.
    pub boarding_duration: Option<f64>,
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Aggregated state of a road edge at one simulation time step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Edge {
    /// Edge identifier.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Number of lanes.
    pub lane_count: Option<u32>,
    /// Street name, if the network carries one.
    pub street_name: Option<String>,
    /// Summed CO2 emission of vehicles on the edge in mg/s.
    pub sum_co2_mg_per_second: Option<f64>,
    /// Summed CO emission in mg/s.
    pub sum_co_mg_per_second: Option<f64>,
    /// Summed hydrocarbon emission in mg/s.
    pub sum_hc_mg_per_second: Option<f64>,
    /// Summed particulate matter emission in mg/s.
    pub sum_pmx_mg_per_second: Option<f64>,
    /// Summed NOx emission in mg/s.
    pub sum_nox_mg_per_second: Option<f64>,
    /// Summed fuel consumption in mg/s.
    pub sum_fuel_consumption: Option<f64>,
    /// Summed electricity consumption in Wh/s.
    pub sum_electricity_consumption: Option<f64>,
    /// Summed noise emission in dBA.
    pub sum_noise_dba: Option<f64>,
    /// Number of vehicles on the edge.
    pub vehicle_count: Option<u32>,
    /// Mean speed of vehicles on the edge in m/s.
    pub mean_vehicle_speed: Option<f64>,
    /// Mean length of vehicles on the edge in metres.
    pub mean_vehicle_length: Option<f64>,
    /// Identifiers of vehicles on the edge.
    pub vehicle_ids: Vec<String>,
    /// Identifiers of persons on the edge.
    pub person_ids: Vec<String>,
    /// Share of time the edge was occupied, in percent.
    pub time_occupancy_percentage: Option<f64>,
    /// Estimated travel time in seconds.
    pub current_travel_duration: Option<f64>,
    /// Number of halting vehicles.
    pub halting_vehicles_count: Option<u32>,
    /// Summed waiting time in seconds.
    pub sum_waiting_time: Option<f64>,
}

// ---------------------------------------------------------------------------
// Lane
// ---------------------------------------------------------------------------

/// An outgoing connection from a lane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Link {
    /// Identifier of the lane the link leads to.
    pub approached_lane: Option<String>,
    /// Whether the link has right of way.
    pub has_prio: Option<bool>,
    /// Whether the link is currently open.
    pub is_open: Option<bool>,
    /// Whether an approaching foe vehicle exists.
    pub has_foe: Option<bool>,
    /// Identifier of the internal junction lane.
    pub approached_internal: Option<String>,
    /// Signal state of the link.
    pub state: Option<String>,
    /// Turn direction of the link.
    pub direction: Option<String>,
    /// Length of the link in metres.
    pub length: Option<f64>,
}

/// State of a single lane at one simulation time step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Lane {
    /// Lane identifier.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Identifier of the edge the lane belongs to.
    pub edge_id: Option<String>,
    /// Vehicle classes allowed on the lane.
    pub allowed_vehicle_types: Vec<String>,
    /// Vehicle classes disallowed on the lane.
    pub disallowed_vehicle_types: Vec<String>,
    /// Length in metres.
    pub length: Option<f64>,
    /// Width in metres.
    pub width: Option<f64>,
    /// Lane geometry as a list of points.
    pub shape: Vec<Vec<f64>>,
    /// Speed limit in m/s.
    pub max_speed: Option<f64>,
    /// Summed CO2 emission in mg/s.
    pub sum_co2_mg_per_second: Option<f64>,
    /// Summed CO emission in mg/s.
    pub sum_co_mg_per_second: Option<f64>,
    /// Summed hydrocarbon emission in mg/s.
    pub sum_hc_mg_per_second: Option<f64>,
    /// Summed particulate matter emission in mg/s.
    pub sum_pmx_mg_per_second: Option<f64>,
    /// Summed NOx emission in mg/s.
    pub sum_nox_mg_per_second: Option<f64>,
    /// Summed fuel consumption in mg/s.
    pub sum_fuel_consumption: Option<f64>,
    /// Summed electricity consumption in Wh/s.
    pub sum_electricity_consumption: Option<f64>,
    /// Summed noise emission in dBA.
    pub sum_noise_dba: Option<f64>,
    /// Number of vehicles on the lane.
    pub vehicle_count: Option<u32>,
    /// Identifiers of vehicles on the lane.
    pub vehicle_ids: Vec<String>,
    /// Share of time the lane was occupied, in percent.
    pub time_occupancy_percentage: Option<f64>,
    /// Mean speed of vehicles on the lane in m/s.
    pub mean_vehicle_speed: Option<f64>,
    /// Mean length of vehicles on the lane in metres.
    pub mean_vehicle_length: Option<f64>,
    /// Summed waiting time in seconds.
    pub sum_waiting_time: Option<f64>,
    /// Estimated travel time in seconds.
    pub current_travel_duration: Option<f64>,
    /// Number of halting vehicles.
    pub halting_vehicles_count: Option<u32>,
    /// Angle between the lane's start and end point in degrees.
    pub start_to_end_angle: Option<f64>,
    /// Vehicle classes allowed to change to the left neighbour.
    pub lane_change_allowed_left: Vec<String>,
    /// Vehicle classes allowed to change to the right neighbour.
    pub lane_change_allowed_right: Vec<String>,
    /// Outgoing connections.
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Junction
// ---------------------------------------------------------------------------

/// A road junction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Junction {
    /// Junction identifier.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Centre position.
    pub position: Option<Position>,
    /// Outline polygon as a list of points.
    pub shape: Vec<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A driving route through the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Route {
    /// Route identifier.
    pub id: String,
    /// Simulation time the snapshot was taken at.
    #[ts(type = "number")]
    pub time_step: i64,
    /// Ordered identifiers of the edges along the route.
    pub edges: Vec<String>,
}
