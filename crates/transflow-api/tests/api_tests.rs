//! Integration tests for the query API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. State is seeded by feeding bus messages through
//! a real dispatcher.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use transflow_api::router::build_router;
use transflow_api::state::AppState;
use transflow_store::{Dispatcher, SimulationRegistry};

fn make_test_router() -> Router {
    let dispatcher = Dispatcher::new(Arc::new(SimulationRegistry::new()));
    let messages: [(&str, &str); 8] = [
        ("sim/run1/metrics/vehicles/10", r#"{"id":"v1","vehicleTypeId":"car","speed":1.5}"#),
        ("sim/run1/metrics/vehicles/20", r#"{"id":"v1","vehicleTypeId":"car","speed":2.5}"#),
        ("sim/run1/metrics/vehicles/30", r#"{"id":"v1","vehicleTypeId":"car","speed":3.5}"#),
        ("sim/run1/metrics/vehicles/15", r#"{"id":"v2"}"#),
        ("sim/run1/metrics/vehicle_types/10", r#"{"id":"car","maxSpeed":50.0}"#),
        ("sim/run1/metrics/vehicle_types/20", r#"{"id":"car","maxSpeed":55.0}"#),
        ("sim/run1/metrics/edges/10", r#"{"id":"e1","laneCount":2}"#),
        ("sim/run1/bogus/edges/10", r#"{"id":"e2"}"#),
    ];
    for (topic, payload) in messages {
        dispatcher.handle(topic, payload.as_bytes());
    }
    build_router(Arc::new(AppState::new(&dispatcher)))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_status_reports_counters() {
    let (status, json) = get(make_test_router(), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["simulations"], 1);
    assert_eq!(json["ingest"]["stored"], 7);
    assert_eq!(json["ingest"]["topic_rejected"], 1);
    assert!(json["started_at"].is_string());
}

#[tokio::test]
async fn test_list_simulations() {
    let (status, json) = get(make_test_router(), "/api/simulations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(["run1"]));
}

#[tokio::test]
async fn test_list_vehicles() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/vehicles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!([
            {"id": "v1", "vehicleTypeId": "car"},
            {"id": "v2", "vehicleTypeId": null},
        ])
    );
}

#[tokio::test]
async fn test_list_vehicle_types() {
    let (_, json) = get(make_test_router(), "/api/simulations/run1/vehicle-types").await;
    assert_eq!(json, serde_json::json!(["car"]));
}

#[tokio::test]
async fn test_vehicle_type_snapshot_is_earliest() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/vehicle-types/car").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timeStep"], 10);
    assert_eq!(json["maxSpeed"], 50.0);
}

#[tokio::test]
async fn test_vehicle_series_is_ascending() {
    let (_, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/series").await;
    let steps: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["timeStep"].as_i64().unwrap())
        .collect();
    assert_eq!(steps, vec![10, 20, 30]);
}

#[tokio::test]
async fn test_vehicle_at_hit_and_miss() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/at/20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["speed"], 2.5);

    let (status, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/at/21").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());
}

#[tokio::test]
async fn test_vehicle_at_rejects_non_numeric_step() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/at/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_vehicle_range_inclusive() {
    let (_, json) = get(
        make_test_router(),
        "/api/simulations/run1/vehicles/v1/range?from=10&to=20",
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (_, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/range?from=20").await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (_, json) = get(make_test_router(), "/api/simulations/run1/vehicles/v1/range").await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_vehicle_range_inverted_is_empty() {
    let (status, json) = get(
        make_test_router(),
        "/api/simulations/run1/vehicles/v1/range?from=30&to=10",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_vehicle_range_rejects_bad_bound() {
    let (status, _) = get(
        make_test_router(),
        "/api/simulations/run1/vehicles/v1/range?from=early",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_simulation_is_empty_not_404() {
    let (status, json) = get(make_test_router(), "/api/simulations/ghost/vehicles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));

    let (status, json) = get(make_test_router(), "/api/simulations/ghost/vehicles/v1/at/10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());
}

#[tokio::test]
async fn test_domain_entities_and_first() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/domains/edges").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(["e1"]));

    let (status, json) = get(
        make_test_router(),
        "/api/simulations/run1/domains/vehicle_types/first",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "car");
    assert_eq!(json[0]["timeStep"], 10);

    let (status, json) =
        get(make_test_router(), "/api/simulations/ghost/domains/edges/first").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));

    let (status, _) = get(make_test_router(), "/api/simulations/run1/domains/boats/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_domain_series_point_and_range() {
    let (_, json) = get(make_test_router(), "/api/simulations/run1/domains/vehicles/v1").await;
    assert_eq!(json.as_array().unwrap().len(), 3);

    let (_, json) = get(make_test_router(), "/api/simulations/run1/domains/edges/e1/at/10").await;
    assert_eq!(json["laneCount"], 2);

    let (_, json) = get(
        make_test_router(),
        "/api/simulations/run1/domains/vehicles/v1/range?from=15&to=35",
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_domain_is_bad_request() {
    let (status, json) = get(make_test_router(), "/api/simulations/run1/domains/boats").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("boats"));
}
