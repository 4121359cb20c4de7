use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::OperatorController;
use crate::dto::{OperatorRequest, OperatorResponse};
use crate::middleware::Actor;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_operator_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_operators).post(create_operator))
        .route("/all", get(list_all_operators))
        .route("/:id", get(get_operator).put(update_operator).delete(delete_operator))
}

fn controller(state: &AppState, actor: Actor) -> OperatorController {
    OperatorController::new(state.stores.clone(), actor.into_inner())
}

async fn list_active_operators(
    State(state): State<AppState>,
) -> Result<Json<Vec<OperatorResponse>>, AppError> {
    let response = controller(&state, Actor::default()).list_active().await?;
    Ok(Json(response))
}

async fn list_all_operators(
    State(state): State<AppState>,
) -> Result<Json<Vec<OperatorResponse>>, AppError> {
    let response = controller(&state, Actor::default()).list_all().await?;
    Ok(Json(response))
}

async fn get_operator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperatorResponse>, AppError> {
    let response = controller(&state, Actor::default()).get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_operator(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<OperatorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OperatorResponse>), AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_operator(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    payload: Result<Json<OperatorRequest>, JsonRejection>,
) -> Result<Json<OperatorResponse>, AppError> {
    let Json(request) = payload?;
    let response = controller(&state, actor).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_operator(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    controller(&state, actor).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
