//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Stores;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub stores: Stores,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, stores: Stores) -> Self {
        Self { config, stores }
    }
}
