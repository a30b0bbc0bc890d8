//! Origen de datos del motor de informes

use async_trait::async_trait;

use crate::reports::snapshot::ReportSnapshot;
use crate::utils::errors::AppError;

/// Entrega una instantánea coherente de las seis colecciones de negocio
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    async fn load_snapshot(&self) -> Result<ReportSnapshot, AppError>;
}

/// Origen fijo en memoria
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportSource {
    snapshot: ReportSnapshot,
}

impl InMemoryReportSource {
    pub fn new(snapshot: ReportSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl ReportDataSource for InMemoryReportSource {
    async fn load_snapshot(&self) -> Result<ReportSnapshot, AppError> {
        Ok(self.snapshot.clone())
    }
}
