//! Middleware del sistema
//!
//! CORS y extracción del actor que firma las marcas de auditoría.

pub mod actor;
pub mod cors;

pub use actor::{actor_middleware, Actor};
pub use cors::cors_layer;
