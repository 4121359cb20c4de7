//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL, las migraciones y los datos iniciales.

pub mod connection;
pub mod seed;

pub use connection::{create_pool, run_migrations};
pub use seed::seed_if_empty;
