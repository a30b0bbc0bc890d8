//! Informe de deuda por cliente
//!
//! Solo aparecen clientes con deuda pendiente positiva, ordenados de mayor a
//! menor deuda pendiente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::ReportSnapshot;
use crate::dto::report_dto::DebtReportDto;
use crate::models::Invoice;

/// La factura vencida e impagada más antigua de un conjunto, por fecha de vencimiento
pub(crate) fn oldest_overdue<'a, I>(invoices: I, now: DateTime<Utc>) -> Option<&'a Invoice>
where
    I: IntoIterator<Item = &'a Invoice>,
{
    invoices
        .into_iter()
        .filter(|i| i.is_past_due(now))
        .min_by_key(|i| i.due_date)
}

/// Días completos transcurridos desde el vencimiento, 0 si no hay factura vencida
pub(crate) fn days_overdue(oldest: Option<&Invoice>, now: DateTime<Utc>) -> i64 {
    oldest.map_or(0, |i| (now - i.due_date).num_days())
}

pub fn build(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> Vec<DebtReportDto> {
    let mut rows: Vec<_> = snapshot
        .customers
        .iter()
        .map(|c| {
            let invoices: Vec<_> = snapshot.invoices_of_customer(c.id).collect();
            let total_debt: Decimal = invoices.iter().map(|i| i.total_amount).sum();
            let total_paid: Decimal = invoices.iter().map(|i| snapshot.paid_amount(i.id)).sum();
            let oldest = oldest_overdue(invoices.iter().copied(), now);

            DebtReportDto {
                customer_id: c.id,
                customer_name: c.name.clone(),
                total_debt,
                total_paid,
                remaining_debt: total_debt - total_paid,
                invoice_count: invoices.len(),
                oldest_invoice_date: oldest.map(|i| i.due_date),
                days_overdue: days_overdue(oldest, now),
            }
        })
        .filter(|row| row.remaining_debt > Decimal::ZERO)
        .collect();

    rows.sort_by(|a, b| b.remaining_debt.cmp(&a.remaining_debt));
    rows
}
