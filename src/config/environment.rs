//! Configuración de variables de entorno
//!
//! Todas las variables tienen un valor por defecto razonable para
//! desarrollo; un valor presente pero mal formado es un error de arranque.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use super::database::DatabaseConfig;

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND inválido: {}", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub seed_data: bool,
    pub database: Option<DatabaseConfig>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 5000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec![
                "http://localhost:4200".to_string(),
                "https://localhost:4200".to_string(),
            ],
            storage: StorageBackend::Postgres,
            seed_data: true,
            database: None,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una fuente arbitraria de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("PORT debe ser un número válido: {}", value))?,
            None => defaults.port,
        };

        let cors_origins = match var("CORS_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let storage = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage,
        };

        let seed_data = match var("SEED_DATA") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| anyhow!("SEED_DATA debe ser true o false: {}", value))?,
            None => defaults.seed_data,
        };

        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig::from_lookup(url, &var)?),
            None if storage == StorageBackend::Postgres => {
                return Err(anyhow!(
                    "DATABASE_URL es obligatoria con STORAGE_BACKEND=postgres"
                ))
            }
            None => None,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: var("HOST").unwrap_or(defaults.host),
            cors_origins,
            storage,
            seed_data,
            database,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
