//! Servicio de informes
//!
//! Carga una instantánea del origen de datos y delega en el motor puro de
//! `crate::reports`. El reloj se inyecta para que "ahora" sea reproducible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dto::report_dto::{
    CustomerReportDto, DashboardDto, DebtReportDto, DriverReportDto, RevenueDetailReportDto,
    RevenueReportDto, TripDetailReportDto, TripStatusReportDto, TruckReportDto,
};
use crate::reports::{self, Clock, PeriodType, ReportDataSource, ReportSnapshot};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportDataSource>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportDataSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn snapshot(&self, report: &str) -> Result<(ReportSnapshot, DateTime<Utc>), AppError> {
        let snapshot = self.source.load_snapshot().await?;
        let now = self.clock.now();
        debug!("📈 Generando informe '{}' a {}", report, now);
        Ok((snapshot, now))
    }

    pub async fn dashboard(&self) -> Result<DashboardDto, AppError> {
        let (snapshot, now) = self.snapshot("dashboard").await?;
        Ok(reports::dashboard::build(&snapshot, now))
    }

    pub async fn revenue(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<RevenueReportDto, AppError> {
        let (snapshot, _) = self.snapshot("revenue").await?;
        Ok(reports::revenue::build(&snapshot, from, to))
    }

    pub async fn debt(&self) -> Result<Vec<DebtReportDto>, AppError> {
        let (snapshot, now) = self.snapshot("debt").await?;
        Ok(reports::debt::build(&snapshot, now))
    }

    pub async fn trip_status(&self) -> Result<Vec<TripStatusReportDto>, AppError> {
        let (snapshot, _) = self.snapshot("trip-status").await?;
        Ok(reports::trip_status::build(&snapshot))
    }

    pub async fn revenue_detail(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: PeriodType,
    ) -> Result<RevenueDetailReportDto, AppError> {
        let (snapshot, now) = self.snapshot("revenue-detail").await?;
        Ok(reports::revenue_detail::build(&snapshot, from, to, period, now))
    }

    pub async fn trip_detail(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<TripDetailReportDto, AppError> {
        let (snapshot, now) = self.snapshot("trip-detail").await?;
        Ok(reports::trip_detail::build(&snapshot, from, to, now))
    }

    pub async fn truck(&self) -> Result<TruckReportDto, AppError> {
        let (snapshot, now) = self.snapshot("truck").await?;
        Ok(reports::truck::build(&snapshot, now))
    }

    pub async fn driver(&self) -> Result<DriverReportDto, AppError> {
        let (snapshot, now) = self.snapshot("driver").await?;
        Ok(reports::driver::build(&snapshot, now))
    }

    pub async fn customer(&self) -> Result<CustomerReportDto, AppError> {
        let (snapshot, now) = self.snapshot("customer").await?;
        Ok(reports::customer::build(&snapshot, now))
    }
}
