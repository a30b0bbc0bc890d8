use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::driver_dto::DriverRequest;
use crate::models::{Driver, DriverStatus};
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY full_name")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM drivers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn license_number_exists(&self, license_number: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_number)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        request: &DriverRequest,
        status: DriverStatus,
        now: DateTime<Utc>,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, full_name, phone, email, license_number, license_expiry_date,
                                 address, status, assigned_truck_id, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.full_name.trim())
        .bind(&request.phone)
        .bind(&request.email)
        .bind(request.license_number.trim())
        .bind(request.license_expiry_date)
        .bind(&request.address)
        .bind(status)
        .bind(request.assigned_truck_id)
        .bind(&request.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &DriverRequest,
        status: DriverStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = $2, phone = $3, email = $4, license_number = $5, license_expiry_date = $6,
                address = $7, status = $8, assigned_truck_id = $9, notes = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.full_name.trim())
        .bind(&request.phone)
        .bind(&request.email)
        .bind(request.license_number.trim())
        .bind(request.license_expiry_date)
        .bind(&request.address)
        .bind(status)
        .bind(request.assigned_truck_id)
        .bind(&request.notes)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
