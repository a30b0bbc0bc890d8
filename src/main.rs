use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transport_management::config::{DatabaseConfig, EnvironmentConfig};
use transport_management::database::{connect_and_migrate, seed_default_users, seed_sample_data};
use transport_management::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    info!("🚚 Transport Management API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = match connect_and_migrate(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error de base de datos: {:#}", e);
            return Err(e);
        }
    };

    if config.seed_default_users {
        match seed_default_users(&pool).await {
            Ok(0) => info!("👥 Usuarios existentes, no se crean usuarios por defecto"),
            Ok(count) => warn!("👥 {} usuarios por defecto creados; cambia sus contraseñas", count),
            Err(e) => error!("❌ Error creando usuarios por defecto: {}", e),
        }
    }

    if config.seed_sample_data {
        match seed_sample_data(&pool, chrono::Utc::now()).await {
            Ok(0) => info!("🌱 Ya hay clientes, no se cargan datos de ejemplo"),
            Ok(count) => info!("🌱 {} filas de ejemplo creadas", count),
            Err(e) => error!("❌ Error cargando datos de ejemplo: {}", e),
        }
    }

    let addr: SocketAddr = config.server_url().parse()?;
    if config.cors_origins.is_empty() {
        warn!("🌍 CORS_ORIGINS vacío: se permite cualquier origen");
    }
    info!("🔧 Entorno: {}", config.environment);

    let app = create_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   GET  /health");
    info!("   POST /api/auth/login | /api/auth/refresh");
    info!("   CRUD /api/customers | trucks | drivers | trips | invoices | payments");
    info!("   GET  /api/reports/{{dashboard, revenue, debt, trip-status, revenue-detail, trip-detail, truck, driver, customer}}");

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
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
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
