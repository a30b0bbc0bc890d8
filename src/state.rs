//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::report_repository::PgReportDataSource;
use crate::reports::{Clock, ReportDataSource, SystemClock};
use crate::services::ReportService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub clock: Arc<dyn Clock>,
    pub report_source: Arc<dyn ReportDataSource>,
}

impl AppState {
    /// Estado de producción: reloj del sistema e informes desde PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let report_source = Arc::new(PgReportDataSource::new(pool.clone()));
        Self::with_parts(pool, config, Arc::new(SystemClock), report_source)
    }

    pub fn with_parts(
        pool: PgPool,
        config: EnvironmentConfig,
        clock: Arc<dyn Clock>,
        report_source: Arc<dyn ReportDataSource>,
    ) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            pool,
            config: Arc::new(config),
            jwt,
            clock,
            report_source,
        }
    }

    pub fn report_service(&self) -> ReportService {
        ReportService::new(self.report_source.clone(), self.clock.clone())
    }
}
