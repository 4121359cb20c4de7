//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 5,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Construir desde la URL y las variables opcionales de tamaño del pool
    pub(crate) fn from_lookup<F>(url: String, var: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(url);
        if let Some(value) = var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = value
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {}", value))?;
        }
        if let Some(value) = var("DATABASE_MIN_CONNECTIONS") {
            config.min_connections = value
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MIN_CONNECTIONS inválido: {}", value))?;
        }
        config.min_connections = config.min_connections.min(config.max_connections);
        Ok(config)
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_connections_never_exceed_max() {
        let var = |key: &str| match key {
            "DATABASE_MAX_CONNECTIONS" => Some("3".to_string()),
            _ => None,
        };
        let config = DatabaseConfig::from_lookup("postgres://localhost/db".to_string(), &var).unwrap();
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 3);
    }
}
