//! Conexión a PostgreSQL y migraciones embebidas

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Abrir el pool y aplicar las migraciones pendientes
pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🗄️ Conectando a {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Error aplicando migraciones")?;

    info!("✅ Base de datos lista (máx. {} conexiones)", config.max_connections);
    Ok(pool)
}

/// Enmascarar credenciales de la URL para los logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }

    format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
}
