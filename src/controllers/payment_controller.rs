use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::payment_dto::{PaymentDto, PaymentRequest};
use crate::models::PaymentMethod;
use crate::repositories::payment_repository::PaymentRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::numbering::{generate_number, PAYMENT_PREFIX};
use crate::utils::validation::parse_enum;

pub struct PaymentController {
    repository: PaymentRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PaymentRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<PaymentDto>, AppError> {
        self.repository.find_all().await
    }

    pub async fn list_by_invoice(&self, invoice_id: Uuid) -> Result<Vec<PaymentDto>, AppError> {
        self.repository.find_by_invoice(invoice_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PaymentDto, AppError> {
        self.repository
            .find_dto_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Payment", &id.to_string()))
    }

    pub async fn create(&self, request: PaymentRequest, now: DateTime<Utc>) -> Result<PaymentDto, AppError> {
        request.validate()?;
        let method: PaymentMethod = parse_enum(&request.payment_method)?;

        let payment_number = generate_number(PAYMENT_PREFIX, now);
        let id = self
            .repository
            .create_and_refresh_invoice(&payment_number, &request, method, now)
            .await?
            .ok_or_else(|| not_found_error("Invoice", &request.invoice_id.to_string()))?;
        info!("💰 Pago {} registrado: {} sobre factura {}", payment_number, request.amount, request.invoice_id);

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), AppError> {
        if !self.repository.delete_and_refresh_invoice(id, now).await? {
            return Err(not_found_error("Payment", &id.to_string()));
        }
        info!("🗑️ Pago eliminado: {}", id);
        Ok(())
    }
}
