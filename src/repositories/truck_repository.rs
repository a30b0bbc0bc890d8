use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::truck_dto::TruckRequest;
use crate::models::{Truck, TruckStatus};
use crate::utils::errors::AppError;

pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>("SELECT * FROM trucks ORDER BY license_plate")
            .fetch_all(&self.pool)
            .await?;

        Ok(trucks)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM trucks WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn license_plate_exists(&self, license_plate: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trucks WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        request: &TruckRequest,
        status: TruckStatus,
        now: DateTime<Utc>,
    ) -> Result<Truck, AppError> {
        let next_maintenance =
            Truck::scheduled_next_maintenance(request.last_maintenance_date, request.maintenance_interval_days);

        let truck = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (id, license_plate, brand, model, year, capacity, status,
                                last_maintenance_date, next_maintenance_date, maintenance_interval_days,
                                notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.license_plate.trim())
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.capacity)
        .bind(status)
        .bind(request.last_maintenance_date)
        .bind(next_maintenance)
        .bind(request.maintenance_interval_days)
        .bind(&request.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &TruckRequest,
        status: TruckStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Truck>, AppError> {
        let next_maintenance =
            Truck::scheduled_next_maintenance(request.last_maintenance_date, request.maintenance_interval_days);

        let truck = sqlx::query_as::<_, Truck>(
            r#"
            UPDATE trucks
            SET license_plate = $2, brand = $3, model = $4, year = $5, capacity = $6, status = $7,
                last_maintenance_date = $8, next_maintenance_date = $9, maintenance_interval_days = $10,
                notes = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.license_plate.trim())
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.capacity)
        .bind(status)
        .bind(request.last_maintenance_date)
        .bind(next_maintenance)
        .bind(request.maintenance_interval_days)
        .bind(&request.notes)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
