use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{Customer, Driver, Invoice, Payment, Trip, Truck};
use crate::reports::{ReportDataSource, ReportSnapshot};
use crate::utils::errors::AppError;

/// Carga la instantánea de informes desde PostgreSQL
pub struct PgReportDataSource {
    pool: PgPool,
}

impl PgReportDataSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportDataSource for PgReportDataSource {
    async fn load_snapshot(&self) -> Result<ReportSnapshot, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers")
            .fetch_all(&mut *tx)
            .await?;
        let trucks = sqlx::query_as::<_, Truck>("SELECT * FROM trucks")
            .fetch_all(&mut *tx)
            .await?;
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers")
            .fetch_all(&mut *tx)
            .await?;
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips")
            .fetch_all(&mut *tx)
            .await?;
        let invoices = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices")
            .fetch_all(&mut *tx)
            .await?;
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments")
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "📊 Instantánea cargada: {} clientes, {} camiones, {} conductores, {} viajes, {} facturas, {} pagos",
            customers.len(),
            trucks.len(),
            drivers.len(),
            trips.len(),
            invoices.len(),
            payments.len()
        );

        Ok(ReportSnapshot::new(customers, trucks, drivers, trips, invoices, payments))
    }
}
