//! Conexión a PostgreSQL
//!
//! Abre el pool y aplica las migraciones embebidas de `migrations/`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear el pool de conexiones y ejecutar migraciones
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🗄️ Conectando a {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("No se pudo conectar a la base de datos")?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error ejecutando migraciones")?;
    info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
