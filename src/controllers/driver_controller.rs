use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::DriverRequest;
use crate::models::{Driver, DriverStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::parse_enum;

pub struct DriverController {
    repository: DriverRepository,
    trucks: TruckRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn create(&self, request: DriverRequest, now: DateTime<Utc>) -> Result<Driver, AppError> {
        let status = self.validate_driver(&request, None).await?;

        let driver = self.repository.create(&request, status, now).await?;
        info!("🧑‍✈️ Conductor creado: {} ({})", driver.full_name, driver.id);
        Ok(driver)
    }

    pub async fn update(&self, id: Uuid, request: DriverRequest, now: DateTime<Utc>) -> Result<Driver, AppError> {
        let status = self.validate_driver(&request, Some(id)).await?;

        self.repository
            .update(id, &request, status, now)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver", &id.to_string()));
        }
        info!("🗑️ Conductor eliminado: {}", id);
        Ok(())
    }

    async fn validate_driver(&self, request: &DriverRequest, exclude: Option<Uuid>) -> Result<DriverStatus, AppError> {
        request.validate()?;
        let status = match request.status.as_deref() {
            Some(status) => parse_enum(status)?,
            None => DriverStatus::Available,
        };

        if self
            .repository
            .license_number_exists(request.license_number.trim(), exclude)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "La licencia '{}' ya está registrada",
                request.license_number.trim()
            )));
        }

        if let Some(truck_id) = request.assigned_truck_id {
            if !self.trucks.exists(truck_id).await? {
                return Err(AppError::BadRequest(format!("El camión '{}' no existe", truck_id)));
            }
        }

        Ok(status)
    }
}
