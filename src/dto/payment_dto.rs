use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::PaymentMethod;
use crate::utils::validation::validate_positive;

/// Request para registrar un pago
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub invoice_id: Uuid,
    pub payment_date: DateTime<Utc>,
    #[validate(custom = "validate_positive")]
    pub amount: Decimal,
    pub payment_method: String,
    #[validate(length(max = 100))]
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

/// Pago con el número de su factura
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub payment_number: String,
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub payment_date: DateTime<Utc>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
