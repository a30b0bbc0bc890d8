use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::truck_dto::TruckRequest;
use crate::models::{Truck, TruckStatus};
use crate::repositories::truck_repository::TruckRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::parse_enum;

pub struct TruckController {
    repository: TruckRepository,
}

impl TruckController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TruckRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Truck>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Truck, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", &id.to_string()))
    }

    pub async fn create(&self, request: TruckRequest, now: DateTime<Utc>) -> Result<Truck, AppError> {
        let status = validate_truck(&request)?;

        if self.repository.license_plate_exists(request.license_plate.trim(), None).await? {
            return Err(AppError::Conflict(format!(
                "La matrícula '{}' ya está registrada",
                request.license_plate.trim()
            )));
        }

        let truck = self.repository.create(&request, status, now).await?;
        info!("🚛 Camión creado: {} ({})", truck.license_plate, truck.id);
        Ok(truck)
    }

    pub async fn update(&self, id: Uuid, request: TruckRequest, now: DateTime<Utc>) -> Result<Truck, AppError> {
        let status = validate_truck(&request)?;

        if self.repository.license_plate_exists(request.license_plate.trim(), Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "La matrícula '{}' ya está registrada",
                request.license_plate.trim()
            )));
        }

        self.repository
            .update(id, &request, status, now)
            .await?
            .ok_or_else(|| not_found_error("Truck", &id.to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Truck", &id.to_string()));
        }
        info!("🗑️ Camión eliminado: {}", id);
        Ok(())
    }
}

fn validate_truck(request: &TruckRequest) -> Result<TruckStatus, AppError> {
    request.validate()?;
    match request.status.as_deref() {
        Some(status) => parse_enum(status),
        None => Ok(TruckStatus::Available),
    }
}
