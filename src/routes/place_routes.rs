use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::PlaceController;
use crate::dto::{PaginationQuery, PlaceRequest, PlaceResponse};
use crate::middleware::Actor;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Cabecera con el total de lugares en el listado paginado
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

pub fn create_place_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_places).post(create_place))
        .route("/all", get(list_all_places))
        .route("/origins", get(list_origins))
        .route("/destinations", get(list_destinations))
        .route("/:id", get(get_place).put(update_place).delete(delete_place))
}

fn controller(state: &AppState, actor: Actor) -> PlaceController {
    PlaceController::new(state.stores.clone(), actor.into_inner())
}

async fn list_active_places(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let response = controller(&state, Actor::default()).list_active().await?;
    Ok(Json(response))
}

async fn list_all_places(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let page = controller(&state, Actor::default()).list_all(query).await?;
    Ok(([(TOTAL_COUNT_HEADER, page.total.to_string())], Json(page.items)))
}

async fn list_origins(State(state): State<AppState>) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let response = controller(&state, Actor::default()).list_origins().await?;
    Ok(Json(response))
}

async fn list_destinations(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let response = controller(&state, Actor::default()).list_destinations().await?;
    Ok(Json(response))
}

async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlaceResponse>, AppError> {
    let response = controller(&state, Actor::default()).get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_place(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceResponse>), AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_place(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<Json<PlaceResponse>, AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_place(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    controller(&state, actor).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
