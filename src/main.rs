use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use concesionaria_api::config::{DatabaseConfig, EnvironmentConfig};
use concesionaria_api::database;
use concesionaria_api::models::Concesionaria;
use concesionaria_api::repositories::{InMemoryRepository, PgConcesionariaRepository, Repository};
use concesionaria_api::routes::create_router;
use concesionaria_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🚗 Concesionaria API");
    info!("===================");

    let config = EnvironmentConfig::from_env()?;

    // Concesionarias en PostgreSQL si hay DATABASE_URL, si no en memoria
    let concesionarias: Arc<dyn Repository<Concesionaria>> = match DatabaseConfig::from_env() {
        Some(db_config) => {
            let pool = database::connect(&db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            info!("✅ PostgreSQL conectado");
            Arc::new(PgConcesionariaRepository::new(pool))
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida: las concesionarias se guardarán en memoria");
            Arc::new(InMemoryRepository::<Concesionaria>::new())
        }
    };

    let app_state = AppState::new(config.clone(), concesionarias);
    let app = create_router(app_state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    for resource in ["clientes", "vendedores", "concesionarias", "autos"] {
        info!("   GET|POST /api/{0}  GET|PUT|DELETE /api/{0}/:id", resource);
    }

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
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
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
