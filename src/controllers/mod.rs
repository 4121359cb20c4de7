//! Controladores
//!
//! Cada controlador se construye por petición con los puertos de
//! persistencia y el actor que firma las marcas de auditoría.

pub mod operator_controller;
pub mod place_controller;
pub mod trip_controller;

pub use operator_controller::OperatorController;
pub use place_controller::{PlaceController, PlacePage};
pub use trip_controller::TripController;
