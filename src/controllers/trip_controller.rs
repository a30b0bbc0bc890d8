use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::trip_dto::{TripDto, TripRequest, TripStatusRequest};
use crate::models::TripStatus;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::numbering::{generate_number, TRIP_PREFIX};
use crate::utils::validation::parse_enum;

pub struct TripController {
    repository: TripRepository,
    customers: CustomerRepository,
    trucks: TruckRepository,
    drivers: DriverRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<TripDto>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TripDto, AppError> {
        self.repository
            .find_dto_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))
    }

    pub async fn create(
        &self,
        request: TripRequest,
        dispatcher_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<TripDto, AppError> {
        self.validate_trip(&request).await?;

        let trip_number = generate_number(TRIP_PREFIX, now);
        let id = self
            .repository
            .create(&trip_number, &request, Some(dispatcher_id), now)
            .await?;
        info!("🛣️ Viaje creado: {} ({} -> {})", trip_number, request.origin, request.destination);

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, request: TripRequest, now: DateTime<Utc>) -> Result<TripDto, AppError> {
        self.validate_trip(&request).await?;

        if !self.repository.update(id, &request, now).await? {
            return Err(not_found_error("Trip", &id.to_string()));
        }
        self.get_by_id(id).await
    }

    /// Cambia el estado; el despachador asignado al crear no se toca
    pub async fn update_status(
        &self,
        id: Uuid,
        request: TripStatusRequest,
        now: DateTime<Utc>,
    ) -> Result<TripDto, AppError> {
        let status: TripStatus = parse_enum(&request.status)?;

        let (previous, trip) = self
            .repository
            .transition_status(id, status, now)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))?;

        info!("🔄 Viaje {}: {} -> {}", trip.trip_number, previous, status);
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Trip", &id.to_string()));
        }
        info!("🗑️ Viaje eliminado: {}", id);
        Ok(())
    }

    async fn validate_trip(&self, request: &TripRequest) -> Result<(), AppError> {
        request.validate()?;

        if !self.customers.exists(request.customer_id).await? {
            return Err(AppError::BadRequest(format!("El cliente '{}' no existe", request.customer_id)));
        }
        if !self.trucks.exists(request.truck_id).await? {
            return Err(AppError::BadRequest(format!("El camión '{}' no existe", request.truck_id)));
        }
        if !self.drivers.exists(request.driver_id).await? {
            return Err(AppError::BadRequest(format!("El conductor '{}' no existe", request.driver_id)));
        }
        Ok(())
    }
}
