//! Transport Control API
//!
//! Backend de control de transporte: catálogos de lugares y operadores y
//! programación de viajes entre lugares.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{actor_middleware, cors_layer};
use crate::state::AppState;

/// Construir el router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(routes::health_check))
        .nest("/api/trips", routes::trip_routes::create_trip_router())
        .nest("/api/places", routes::place_routes::create_place_router())
        .nest("/api/operators", routes::operator_routes::create_operator_router())
        .layer(from_fn(actor_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
