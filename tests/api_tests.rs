use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use transport_control::config::{EnvironmentConfig, StorageBackend};
use transport_control::create_router;
use transport_control::database::seed_if_empty;
use transport_control::repositories::Stores;
use transport_control::state::AppState;

// Ids asignados por la carga inicial
const CDMX: i32 = 1;
const GUADALAJARA: i32 = 2;
const MONTERREY: i32 = 3;
const JUAN: i32 = 1;

async fn create_test_app() -> Router {
    let config = EnvironmentConfig {
        storage: StorageBackend::Memory,
        ..EnvironmentConfig::default()
    };
    let stores = Stores::in_memory();
    seed_if_empty(&stores).await.unwrap();
    create_router(AppState::new(config, stores))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    actor: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

fn trip_body(origin: i32, destination: i32, operator: i32, start_in_hours: i64) -> Value {
    let start = Utc::now() + Duration::hours(start_in_hours);
    json!({
        "originId": origin,
        "destinationId": destination,
        "operatorId": operator,
        "scheduledStartDateTime": start.to_rfc3339(),
        "scheduledEndDateTime": (start + Duration::hours(6)).to_rfc3339(),
        "estimatedDistance": 540.5,
        "notes": "Carga general"
    })
}

async fn create_trip(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/api/trips", Some(body), None).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_seeded_places_are_listed_by_name() {
    let app = create_test_app().await;
    let response = get(&app, "/api/places").await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Cancún", "Ciudad de México", "Guadalajara", "Monterrey", "Puebla"]
    );
    assert_eq!(response.body[0]["type"], 1);
    assert_eq!(response.body[0]["country"], "Mexico");
}

#[tokio::test]
async fn test_place_pagination_sets_total_count() {
    let app = create_test_app().await;

    let response = get(&app, "/api/places/all?page=2&pageSize=2").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);
    assert_eq!(response.headers.get("x-total-count").unwrap(), "5");
    assert_eq!(response.body[0]["name"], "Guadalajara");

    // Valores fuera de rango vuelven a los de por defecto
    let response = get(&app, "/api/places/all?page=0&pageSize=500").await;
    assert_eq!(response.body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_duplicate_place_code_is_a_conflict() {
    let app = create_test_app().await;
    let place = json!({ "name": "Warehouse X", "code": "WH1", "type": 3 });

    let first = send(&app, Method::POST, "/api/places", Some(place.clone()), Some("dispatcher")).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["createdBy"], "dispatcher");
    assert_eq!(first.body["createdAt"], first.body["modifiedAt"]);

    let second = send(&app, Method::POST, "/api/places", Some(place), None).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_place_update_keeps_its_own_code_and_refreshes_audit() {
    let app = create_test_app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/places",
        Some(json!({ "name": "Almacén Sur", "code": "ALS" })),
        Some("dispatcher"),
    )
    .await;
    let id = created.body["id"].as_i64().unwrap();

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/places/{}", id),
        Some(json!({ "id": id, "name": "Almacén Sur", "code": "ALS", "isDestinationAllowed": false })),
        Some("supervisor"),
    )
    .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["isDestinationAllowed"], false);
    assert_eq!(updated.body["createdBy"], "dispatcher");
    assert_eq!(updated.body["modifiedBy"], "supervisor");
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);

    let destinations = get(&app, "/api/places/destinations").await;
    assert!(destinations
        .body
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"].as_i64() != Some(id)));
}

#[tokio::test]
async fn test_put_with_mismatched_id_is_rejected() {
    let app = create_test_app().await;
    let response = send(
        &app,
        Method::PUT,
        "/api/places/1",
        Some(json!({ "id": 2, "name": "Ciudad de México" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_place_name_is_rejected() {
    let app = create_test_app().await;
    let response = send(&app, Method::POST, "/api/places", Some(json!({ "name": "  " })), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_employee_id_is_a_conflict() {
    let app = create_test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/operators",
        Some(json!({ "firstName": "Pedro", "lastName": "Ramírez", "employeeId": "EMP001" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Ya existe un operador con este ID de empleado");
}

#[tokio::test]
async fn test_operator_listings() {
    let app = create_test_app().await;

    let active = get(&app, "/api/operators").await;
    let last_names: Vec<&str> = active.body.as_array().unwrap().iter().map(|o| o["lastName"].as_str().unwrap()).collect();
    assert_eq!(
        last_names,
        vec!["García López", "Hernández Silva", "Martínez Rodríguez", "Pérez González"]
    );

    let all = get(&app, "/api/operators/all").await;
    assert_eq!(all.body[0]["fullName"], "Ana García López");

    let missing = get(&app, "/api/operators/99").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_trip_populates_reference_data() {
    let app = create_test_app().await;
    let trip = create_trip(&app, trip_body(CDMX, MONTERREY, JUAN, 24)).await;

    assert_eq!(trip["status"], 1);
    assert_eq!(trip["originName"], "Ciudad de México");
    assert_eq!(trip["destinationName"], "Monterrey");
    assert_eq!(trip["operatorName"], "Juan Pérez González");
    assert_eq!(trip["origin"]["id"], CDMX);
    assert_eq!(trip["estimatedDistance"], 540.5);

    let fetched = get(&app, &format!("/api/trips/{}", trip["id"])).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["operator"]["employeeId"], "EMP001");
}

#[tokio::test]
async fn test_trip_with_same_origin_and_destination_is_rejected() {
    let app = create_test_app().await;
    let response = send(&app, Method::POST, "/api/trips", Some(trip_body(CDMX, CDMX, JUAN, 1)), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"],
        json!(["El origen y destino no pueden ser iguales"])
    );

    let trips = get(&app, "/api/trips").await;
    assert!(trips.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_trip_with_missing_operator_reports_one_error() {
    let app = create_test_app().await;
    let response = send(&app, Method::POST, "/api/trips", Some(trip_body(CDMX, GUADALAJARA, 42, 2)), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"], json!(["El operador especificado no existe"]));
}

#[tokio::test]
async fn test_trip_collects_every_validation_error() {
    let app = create_test_app().await;
    let start = Utc::now() - Duration::days(2);
    let body = json!({
        "originId": 90,
        "destinationId": 91,
        "operatorId": JUAN,
        "scheduledStartDateTime": start.to_rfc3339(),
        "scheduledEndDateTime": (start - Duration::hours(1)).to_rfc3339()
    });

    let response = send(&app, Method::POST, "/api/trips", Some(body), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"],
        json!([
            "El lugar de origen especificado no existe",
            "El lugar de destino especificado no existe",
            "La fecha de inicio debe ser anterior a la fecha de fin",
            "La fecha programada no puede ser en el pasado"
        ])
    );
}

#[tokio::test]
async fn test_complete_scheduled_trip_and_append_notes() {
    let app = create_test_app().await;
    let trip = create_trip(&app, trip_body(GUADALAJARA, MONTERREY, JUAN, 3)).await;
    let uri = format!("/api/trips/{}/status", trip["id"]);

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "status": 3, "notes": "Entregado sin incidencias" })),
        Some("supervisor"),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], 3);
    assert!(response.body["actualEndDateTime"].is_string());
    assert!(response.body["actualStartDateTime"].is_null());
    assert_eq!(response.body["notes"], "Carga general; Entregado sin incidencias");
    assert_eq!(response.body["modifiedBy"], "supervisor");
    assert_eq!(response.body["destinationName"], "Monterrey");
}

#[tokio::test]
async fn test_in_progress_uses_supplied_start() {
    let app = create_test_app().await;
    let trip = create_trip(&app, trip_body(GUADALAJARA, CDMX, JUAN, 3)).await;
    let uri = format!("/api/trips/{}/status", trip["id"]);

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "status": 2, "actualStartDateTime": "2030-05-01T10:30:00Z" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["actualStartDateTime"], "2030-05-01T10:30:00Z");
}

#[tokio::test]
async fn test_status_change_on_missing_trip_is_not_found() {
    let app = create_test_app().await;
    let response = send(&app, Method::PATCH, "/api/trips/999/status", Some(json!({ "status": 2 })), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Viaje con ID 999 no encontrado");
}

#[tokio::test]
async fn test_trips_by_status_accepts_code_or_name() {
    let app = create_test_app().await;
    create_trip(&app, trip_body(CDMX, GUADALAJARA, JUAN, 5)).await;

    let by_name = get(&app, "/api/trips/by-status/scheduled").await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body.as_array().unwrap().len(), 1);

    let by_code = get(&app, "/api/trips/by-status/3").await;
    assert!(by_code.body.as_array().unwrap().is_empty());

    let invalid = get(&app, "/api/trips/by-status/Paused").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trips_are_paged_by_scheduled_start_descending() {
    let app = create_test_app().await;
    for hours in [10, 30, 20] {
        create_trip(&app, trip_body(CDMX, MONTERREY, JUAN, hours)).await;
    }

    let first_page = get(&app, "/api/trips?page=1&pageSize=2").await;
    let ids: Vec<i64> = first_page.body.as_array().unwrap().iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3]);

    let second_page = get(&app, "/api/trips?page=2&pageSize=2").await;
    assert_eq!(second_page.body[0]["id"], 1);
}

#[tokio::test]
async fn test_update_trip_revalidates_references() {
    let app = create_test_app().await;
    let trip = create_trip(&app, trip_body(CDMX, MONTERREY, JUAN, 4)).await;
    let uri = format!("/api/trips/{}", trip["id"]);

    let rejected = send(&app, Method::PUT, &uri, Some(trip_body(MONTERREY, MONTERREY, JUAN, 4)), None).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let mut body = trip_body(CDMX, GUADALAJARA, 2, 8);
    body["vehicleId"] = json!("TRK-042");
    let updated = send(&app, Method::PUT, &uri, Some(body), None).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["destinationName"], "Guadalajara");
    assert_eq!(updated.body["operatorName"], "Ana García López");
    assert_eq!(updated.body["vehicleId"], "TRK-042");
    assert_eq!(updated.body["status"], 1);

    let missing = send(&app, Method::PUT, "/api/trips/999", Some(trip_body(CDMX, GUADALAJARA, JUAN, 4)), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_referenced_place_and_operator_cannot_be_deleted() {
    let app = create_test_app().await;
    let trip = create_trip(&app, trip_body(CDMX, MONTERREY, JUAN, 6)).await;

    let place = send(&app, Method::DELETE, &format!("/api/places/{}", MONTERREY), None, None).await;
    assert_eq!(place.status, StatusCode::CONFLICT);
    assert_eq!(get(&app, &format!("/api/places/{}", MONTERREY)).await.status, StatusCode::OK);

    let operator = send(&app, Method::DELETE, &format!("/api/operators/{}", JUAN), None, None).await;
    assert_eq!(operator.status, StatusCode::CONFLICT);

    // Sin el viaje ya se pueden borrar
    let deleted = send(&app, Method::DELETE, &format!("/api/trips/{}", trip["id"]), None, None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let place = send(&app, Method::DELETE, &format!("/api/places/{}", MONTERREY), None, None).await;
    assert_eq!(place.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &format!("/api/places/{}", MONTERREY)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_resources_are_not_found() {
    let app = create_test_app().await;

    assert_eq!(get(&app, "/api/trips/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/api/places/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        send(&app, Method::DELETE, "/api/trips/999", None, None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&app, Method::DELETE, "/api/operators/999", None, None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_page_far_beyond_the_end_is_empty() {
    let app = create_test_app().await;
    create_trip(&app, trip_body(CDMX, GUADALAJARA, JUAN, 2)).await;

    let trips = get(&app, "/api/trips?page=9223372036854775807&pageSize=10").await;
    assert_eq!(trips.status, StatusCode::OK);
    assert_eq!(trips.body, json!([]));

    let places = get(&app, "/api/places/all?page=9223372036854775807&pageSize=100").await;
    assert_eq!(places.status, StatusCode::OK);
    assert_eq!(places.body, json!([]));
    assert_eq!(places.headers.get("x-total-count").unwrap(), "5");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = create_test_app().await;

    let mut missing_end = trip_body(CDMX, GUADALAJARA, JUAN, 2);
    missing_end
        .as_object_mut()
        .unwrap()
        .remove("scheduledEndDateTime");
    let trip = send(&app, Method::POST, "/api/trips", Some(missing_end), None).await;
    assert_eq!(trip.status, StatusCode::BAD_REQUEST);
    assert_eq!(trip.body["code"], "BAD_REQUEST");
    assert!(trip.body["message"]
        .as_str()
        .unwrap()
        .contains("scheduledEndDateTime"));

    let created = create_trip(&app, trip_body(CDMX, GUADALAJARA, JUAN, 2)).await;
    let status = send(
        &app,
        Method::PATCH,
        &format!("/api/trips/{}/status", created["id"]),
        Some(json!({ "status": 9 })),
        None,
    )
    .await;
    assert_eq!(status.status, StatusCode::BAD_REQUEST);
    assert_eq!(status.body["code"], "BAD_REQUEST");

    let place = send(
        &app,
        Method::POST,
        "/api/places",
        Some(json!({ "name": "Puerto Norte", "type": 42 })),
        None,
    )
    .await;
    assert_eq!(place.status, StatusCode::BAD_REQUEST);
    assert_eq!(place.body["code"], "BAD_REQUEST");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/operators")
        .header("content-type", "application/json")
        .body(Body::from("{\"firstName\": \"Ana\","))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    let query = get(&app, "/api/trips?page=abc").await;
    assert_eq!(query.status, StatusCode::BAD_REQUEST);
    assert_eq!(query.body["code"], "BAD_REQUEST");
}
