use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};

use crate::controllers::TripController;
use crate::dto::{PaginationQuery, TripRequest, TripResponse, UpdateTripStatusRequest};
use crate::middleware::Actor;
use crate::models::TripStatus;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/by-status/:status", get(list_trips_by_status))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
        .route("/:id/status", patch(update_trip_status))
}

fn controller(state: &AppState, actor: Actor) -> TripController {
    TripController::new(state.stores.clone(), actor.into_inner())
}

async fn list_trips(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let Query(query) = query?;
    let response = controller(&state, Actor::default()).list(query).await?;
    Ok(Json(response))
}

async fn list_trips_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let status: TripStatus = status.parse().map_err(|e: String| bad_request_error(&e))?;
    let response = controller(&state, Actor::default()).list_by_status(status).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TripResponse>, AppError> {
    let response = controller(&state, Actor::default()).get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_trip(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TripResponse>), AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_trip(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).update(id, request).await?;
    Ok(Json(response))
}

async fn update_trip_status(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateTripStatusRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    controller(&state, actor).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
