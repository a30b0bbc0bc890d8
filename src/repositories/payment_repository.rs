use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::dto::payment_dto::{PaymentDto, PaymentRequest};
use crate::models::{InvoiceStatus, PaymentMethod};
use crate::utils::errors::{not_found_error, AppError};

const SELECT_PAYMENT_DTO: &str = r#"
    SELECT p.id, p.payment_number, p.invoice_id, i.invoice_number, p.payment_date,
           p.amount, p.payment_method, p.reference_number, p.notes, p.created_at
    FROM payments p
    JOIN invoices i ON i.id = p.invoice_id
"#;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<PaymentDto>, AppError> {
        let sql = format!("{} ORDER BY p.payment_date DESC", SELECT_PAYMENT_DTO);
        let payments = sqlx::query_as::<_, PaymentDto>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    pub async fn find_by_invoice(&self, invoice_id: Uuid) -> Result<Vec<PaymentDto>, AppError> {
        let sql = format!("{} WHERE p.invoice_id = $1 ORDER BY p.payment_date DESC", SELECT_PAYMENT_DTO);
        let payments = sqlx::query_as::<_, PaymentDto>(&sql)
            .bind(invoice_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    pub async fn find_dto_by_id(&self, id: Uuid) -> Result<Option<PaymentDto>, AppError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PAYMENT_DTO);
        let payment = sqlx::query_as::<_, PaymentDto>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    /// Inserta el pago y recalcula el estado de su factura en la misma transacción.
    /// Devuelve `None` si la factura no existe.
    pub async fn create_and_refresh_invoice(
        &self,
        payment_number: &str,
        request: &PaymentRequest,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, AppError> {
        let mut tx = self.pool.begin().await?;

        if lock_invoice(&mut tx, request.invoice_id).await?.is_none() {
            return Ok(None);
        }

        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO payments (id, payment_number, invoice_id, payment_date, amount,
                                  payment_method, reference_number, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(payment_number)
        .bind(request.invoice_id)
        .bind(request.payment_date)
        .bind(request.amount)
        .bind(method)
        .bind(&request.reference_number)
        .bind(&request.notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        refresh_invoice_status(&mut tx, request.invoice_id, now).await?;
        tx.commit().await?;

        Ok(Some(id))
    }

    /// Borra el pago y recalcula el estado de su factura. `false` si no existía.
    pub async fn delete_and_refresh_invoice(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoice_id: Option<(Uuid,)> = sqlx::query_as("SELECT invoice_id FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some((invoice_id,)) = invoice_id else {
            return Ok(false);
        };

        lock_invoice(&mut tx, invoice_id).await?;

        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        refresh_invoice_status(&mut tx, invoice_id, now).await?;
        tx.commit().await?;

        Ok(true)
    }
}

async fn lock_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
) -> Result<Option<(Decimal, DateTime<Utc>)>, AppError> {
    let row: Option<(Decimal, DateTime<Utc>)> =
        sqlx::query_as("SELECT total_amount, due_date FROM invoices WHERE id = $1 FOR UPDATE")
            .bind(invoice_id)
            .fetch_optional(&mut **tx)
            .await?;

    Ok(row)
}

async fn refresh_invoice_status(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    now: DateTime<Utc>,
) -> Result<InvoiceStatus, AppError> {
    let (total, due_date) = lock_invoice(tx, invoice_id)
        .await?
        .ok_or_else(|| not_found_error("Invoice", &invoice_id.to_string()))?;

    let paid: (Decimal,) = sqlx::query_as("SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = $1")
        .bind(invoice_id)
        .fetch_one(&mut **tx)
        .await?;

    let status = InvoiceStatus::derive(paid.0, total, due_date, now);
    sqlx::query("UPDATE invoices SET status = $2, updated_at = $3 WHERE id = $1")
        .bind(invoice_id)
        .bind(status)
        .bind(now)
        .execute(&mut **tx)
        .await?;

    debug!("🧾 Factura {} recalculada: pagado {} de {} -> {}", invoice_id, paid.0, total, status);
    Ok(status)
}
