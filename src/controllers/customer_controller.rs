use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::CustomerRequest;
use crate::models::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))
    }

    pub async fn create(&self, request: CustomerRequest, now: DateTime<Utc>) -> Result<Customer, AppError> {
        request.validate()?;

        let customer = self.repository.create(&request, now).await?;
        info!("👥 Cliente creado: {} ({})", customer.name, customer.id);
        Ok(customer)
    }

    pub async fn update(&self, id: Uuid, request: CustomerRequest, now: DateTime<Utc>) -> Result<Customer, AppError> {
        request.validate()?;

        self.repository
            .update(id, &request, now)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Customer", &id.to_string()));
        }
        info!("🗑️ Cliente eliminado: {}", id);
        Ok(())
    }
}
