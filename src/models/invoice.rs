//! Modelo de Invoice
//!
//! El total se fija como `amount + tax_amount` y el estado se deriva de la
//! suma de pagos, el total y la fecha de vencimiento.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Estado de la factura - mapea al ENUM invoice_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "invoice_status")]
pub enum InvoiceStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    /// Regla de prioridad: Paid > Partial > Overdue > Pending
    pub fn derive(
        paid: Decimal,
        total: Decimal,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        if paid >= total {
            InvoiceStatus::Paid
        } else if paid > Decimal::ZERO {
            InvoiceStatus::Partial
        } else if due_date < now {
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Partial => "Partial",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    /// Pendiente de cobro a efectos de conteo (Pending o Partial)
    pub fn is_open(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Partial)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factura - mapea exactamente a la tabla invoices
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub tax_amount: Option<Decimal>,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn compute_total(amount: Decimal, tax_amount: Option<Decimal>) -> Decimal {
        amount + tax_amount.unwrap_or(Decimal::ZERO)
    }

    /// Vencida a efectos de informes: fecha pasada y no pagada
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.status != InvoiceStatus::Paid
    }
}
