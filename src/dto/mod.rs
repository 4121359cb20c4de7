//! DTOs de la API
//!
//! Requests (camelCase, validados con `validator`) y responses que
//! exponen las entidades al front end.

pub mod operator_dto;
pub mod place_dto;
pub mod trip_dto;

pub use operator_dto::{OperatorRequest, OperatorResponse};
pub use place_dto::{PlaceRequest, PlaceResponse};
pub use trip_dto::{PaginationQuery, TripRequest, TripResponse, UpdateTripStatusRequest};
