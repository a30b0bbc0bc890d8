use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::invoice_dto::{InvoiceDto, InvoiceRequest};
use crate::models::{Invoice, InvoiceStatus};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::invoice_repository::{InvoiceRepository, InvoiceTotals};
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::numbering::{generate_number, INVOICE_PREFIX};

pub struct InvoiceController {
    repository: InvoiceRepository,
    customers: CustomerRepository,
    trips: TripRepository,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<InvoiceDto>, AppError> {
        self.repository.find_all().await
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<InvoiceDto>, AppError> {
        self.repository.find_by_customer(customer_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InvoiceDto, AppError> {
        self.repository
            .find_dto_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Invoice", &id.to_string()))
    }

    pub async fn create(&self, request: InvoiceRequest, now: DateTime<Utc>) -> Result<InvoiceDto, AppError> {
        self.validate_invoice(&request).await?;

        let totals = totals_for(&request, Decimal::ZERO, now);
        let invoice_number = generate_number(INVOICE_PREFIX, now);
        let id = self.repository.create(&invoice_number, &request, totals, now).await?;
        info!("🧾 Factura creada: {} por {} ({})", invoice_number, totals.total_amount, totals.status);

        self.get_by_id(id).await
    }

    /// Recalcula total y estado con los pagos ya registrados
    pub async fn update(&self, id: Uuid, request: InvoiceRequest, now: DateTime<Utc>) -> Result<InvoiceDto, AppError> {
        self.validate_invoice(&request).await?;

        let updated = self
            .repository
            .update(id, &request, |paid| totals_for(&request, paid, now), now)
            .await?;
        if !updated {
            return Err(not_found_error("Invoice", &id.to_string()));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Invoice", &id.to_string()));
        }
        info!("🗑️ Factura eliminada: {}", id);
        Ok(())
    }

    async fn validate_invoice(&self, request: &InvoiceRequest) -> Result<(), AppError> {
        request.validate()?;

        if !self.customers.exists(request.customer_id).await? {
            return Err(AppError::BadRequest(format!("El cliente '{}' no existe", request.customer_id)));
        }
        if let Some(trip_id) = request.trip_id {
            if !self.trips.exists(trip_id).await? {
                return Err(AppError::BadRequest(format!("El viaje '{}' no existe", trip_id)));
            }
        }
        Ok(())
    }
}

fn totals_for(request: &InvoiceRequest, paid: Decimal, now: DateTime<Utc>) -> InvoiceTotals {
    let total_amount = Invoice::compute_total(request.amount, request.tax_amount);
    InvoiceTotals {
        total_amount,
        status: InvoiceStatus::derive(paid, total_amount, request.due_date, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn request(due_in_days: i64) -> InvoiceRequest {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        InvoiceRequest {
            customer_id: Uuid::new_v4(),
            trip_id: None,
            issue_date: now - Duration::days(40),
            due_date: now + Duration::days(due_in_days),
            amount: dec!(1000000),
            tax_amount: Some(dec!(100000)),
            description: None,
            notes: None,
        }
    }

    #[test]
    fn test_totals_for_new_invoice() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let totals = totals_for(&request(30), Decimal::ZERO, now);
        assert_eq!(totals.total_amount, dec!(1100000));
        assert_eq!(totals.status, InvoiceStatus::Pending);

        let totals = totals_for(&request(-10), Decimal::ZERO, now);
        assert_eq!(totals.status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_totals_keep_existing_payments_in_account() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        assert_eq!(totals_for(&request(30), dec!(500000), now).status, InvoiceStatus::Partial);
        assert_eq!(totals_for(&request(30), dec!(1100000), now).status, InvoiceStatus::Paid);
    }
}
