use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transport_control::config::{EnvironmentConfig, StorageBackend};
use transport_control::create_router;
use transport_control::database::{create_pool, run_migrations, seed_if_empty};
use transport_control::repositories::Stores;
use transport_control::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 Transport Control API");
    info!("========================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;
    info!("⚙️ Entorno: {}", config.environment);

    let stores = match config.storage {
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .context("DATABASE_URL es obligatoria con STORAGE_BACKEND=postgres")?;
            let pool = create_pool(database).await?;
            run_migrations(&pool).await?;
            Stores::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("⚠️ Almacenamiento en memoria: los datos se pierden al reiniciar");
            Stores::in_memory()
        }
    };

    if config.seed_data {
        if let Err(e) = seed_if_empty(&stores).await {
            error!("❌ Error cargando datos iniciales: {}", e);
        }
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_router(AppState::new(config, stores));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("🚛 Viajes:");
    info!("   GET    /api/trips?page=&pageSize=");
    info!("   GET    /api/trips/by-status/:status");
    info!("   GET    /api/trips/:id");
    info!("   POST   /api/trips");
    info!("   PUT    /api/trips/:id");
    info!("   PATCH  /api/trips/:id/status");
    info!("   DELETE /api/trips/:id");
    info!("📍 Lugares:");
    info!("   GET    /api/places | /all | /origins | /destinations | /:id");
    info!("   POST   /api/places  PUT/DELETE /api/places/:id");
    info!("👤 Operadores:");
    info!("   GET    /api/operators | /all | /:id");
    info!("   POST   /api/operators  PUT/DELETE /api/operators/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
