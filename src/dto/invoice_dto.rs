use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::InvoiceStatus;
use crate::utils::validation::validate_non_negative;

/// Request para crear o reemplazar una factura
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_invoice_dates"))]
pub struct InvoiceRequest {
    pub customer_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[validate(custom = "validate_non_negative")]
    pub amount: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub tax_amount: Option<Decimal>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

fn validate_invoice_dates(request: &InvoiceRequest) -> Result<(), ValidationError> {
    if request.due_date < request.issue_date {
        return Err(ValidationError::new("due_date_before_issue_date"));
    }
    Ok(())
}

/// Factura con cliente, viaje y pagos resueltos
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub trip_id: Option<Uuid>,
    pub trip_number: Option<String>,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub tax_amount: Option<Decimal>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub status: InvoiceStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn request() -> InvoiceRequest {
        let issue = Utc::now();
        InvoiceRequest {
            customer_id: Uuid::new_v4(),
            trip_id: None,
            issue_date: issue,
            due_date: issue + Duration::days(30),
            amount: dec!(1000000),
            tax_amount: Some(dec!(100000)),
            description: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut req = request();
        req.amount = dec!(-1);
        assert!(req.validate().is_err());

        let mut req = request();
        req.tax_amount = Some(dec!(-5));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_due_before_issue_rejected() {
        let mut req = request();
        req.due_date = req.issue_date - Duration::days(1);
        assert!(req.validate().is_err());
    }
}
