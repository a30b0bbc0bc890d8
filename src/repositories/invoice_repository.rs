use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::dto::invoice_dto::{InvoiceDto, InvoiceRequest};
use crate::models::InvoiceStatus;
use crate::utils::errors::AppError;

const SELECT_INVOICE_DTO: &str = r#"
    SELECT i.id, i.invoice_number, i.customer_id, c.name AS customer_name,
           i.trip_id, t.trip_number, i.issue_date, i.due_date,
           i.amount, i.tax_amount, i.total_amount,
           COALESCE(p.paid, 0) AS paid_amount,
           i.total_amount - COALESCE(p.paid, 0) AS remaining_amount,
           i.status, i.description, i.notes, i.created_at, i.updated_at
    FROM invoices i
    JOIN customers c ON c.id = i.customer_id
    LEFT JOIN trips t ON t.id = i.trip_id
    LEFT JOIN (
        SELECT invoice_id, SUM(amount) AS paid FROM payments GROUP BY invoice_id
    ) p ON p.invoice_id = i.id
"#;

/// Valores calculados que acompañan a una factura al escribirla
#[derive(Debug, Clone, Copy)]
pub struct InvoiceTotals {
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
}

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<InvoiceDto>, AppError> {
        let sql = format!("{} ORDER BY i.issue_date DESC", SELECT_INVOICE_DTO);
        let invoices = sqlx::query_as::<_, InvoiceDto>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<InvoiceDto>, AppError> {
        let sql = format!("{} WHERE i.customer_id = $1 ORDER BY i.issue_date DESC", SELECT_INVOICE_DTO);
        let invoices = sqlx::query_as::<_, InvoiceDto>(&sql)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    pub async fn find_dto_by_id(&self, id: Uuid) -> Result<Option<InvoiceDto>, AppError> {
        let sql = format!("{} WHERE i.id = $1", SELECT_INVOICE_DTO);
        let invoice = sqlx::query_as::<_, InvoiceDto>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn create(
        &self,
        invoice_number: &str,
        request: &InvoiceRequest,
        totals: InvoiceTotals,
        now: DateTime<Utc>,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO invoices (id, invoice_number, customer_id, trip_id, issue_date, due_date,
                                  amount, tax_amount, total_amount, status, description, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(id)
        .bind(invoice_number)
        .bind(request.customer_id)
        .bind(request.trip_id)
        .bind(request.issue_date)
        .bind(request.due_date)
        .bind(request.amount)
        .bind(request.tax_amount)
        .bind(totals.total_amount)
        .bind(totals.status)
        .bind(&request.description)
        .bind(&request.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Bloquea la factura, suma sus pagos y escribe los nuevos datos con el
    /// total y estado que `totals` deriva de esa suma, todo en una transacción.
    /// `false` si la factura no existe.
    pub async fn update<F>(
        &self,
        id: Uuid,
        request: &InvoiceRequest,
        totals: F,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError>
    where
        F: FnOnce(Decimal) -> InvoiceTotals + Send,
    {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM invoices WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let paid: (Decimal,) = sqlx::query_as("SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let totals = totals(paid.0);

        sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $2, trip_id = $3, issue_date = $4, due_date = $5, amount = $6,
                tax_amount = $7, total_amount = $8, status = $9, description = $10, notes = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.customer_id)
        .bind(request.trip_id)
        .bind(request.issue_date)
        .bind(request.due_date)
        .bind(request.amount)
        .bind(request.tax_amount)
        .bind(totals.total_amount)
        .bind(totals.status)
        .bind(&request.description)
        .bind(&request.notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("🧾 Factura {} actualizada: pagado {} de {} -> {}", id, paid.0, totals.total_amount, totals.status);

        Ok(true)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
