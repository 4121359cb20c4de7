//! Services module
//!
//! Reglas de negocio que no pertenecen a un único controlador.

pub mod trip_validation_service;

pub use trip_validation_service::{TripValidationError, TripValidator};
