//! Informe de clientes
//!
//! Un cliente está activo si tiene algún viaje programado en los últimos
//! 30 días (o en el futuro).

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::debt::{days_overdue, oldest_overdue};
use super::period::month_start;
use super::{average, ReportSnapshot};
use crate::dto::report_dto::{
    CustomerDebtDto, CustomerDetailDto, CustomerReportDto, CustomerRevenueDto, CustomerSummaryDto,
};
use crate::models::{Customer, Invoice};

const ACTIVE_WINDOW_DAYS: i64 = 30;

pub fn build(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> CustomerReportDto {
    let active_since = now - Duration::days(ACTIVE_WINDOW_DAYS);

    let mut customer_details: Vec<_> = snapshot
        .customers
        .iter()
        .map(|c| detail_row(snapshot, c, active_since))
        .collect();

    let total_revenue: Decimal = customer_details.iter().map(|d| d.total_revenue).sum();
    let active_customers = customer_details.iter().filter(|d| d.is_active).count();

    let summary = CustomerSummaryDto {
        total_customers: snapshot.customers.len(),
        active_customers,
        inactive_customers: snapshot.customers.len() - active_customers,
        total_revenue,
        total_debt: customer_details.iter().map(|d| d.remaining_debt).sum(),
        average_revenue_per_customer: average(total_revenue, snapshot.customers.len()),
        total_trips: customer_details.iter().map(|d| d.trip_count).sum(),
    };

    customer_details.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

    let mut customer_revenue: Vec<_> = snapshot
        .customers
        .iter()
        .flat_map(|c| monthly_rows(snapshot, c))
        .collect();
    customer_revenue.sort_by(|a, b| {
        b.period_date
            .cmp(&a.period_date)
            .then_with(|| b.revenue.cmp(&a.revenue))
    });

    let mut customer_debt: Vec<_> = snapshot
        .customers
        .iter()
        .map(|c| debt_row(snapshot, c, now))
        .filter(|row| row.total_debt > Decimal::ZERO)
        .collect();
    customer_debt.sort_by(|a, b| b.overdue_debt.cmp(&a.overdue_debt));

    CustomerReportDto {
        summary,
        customer_details,
        customer_revenue,
        customer_debt,
    }
}

fn detail_row(snapshot: &ReportSnapshot, customer: &Customer, active_since: DateTime<Utc>) -> CustomerDetailDto {
    let trips: Vec<_> = snapshot.trips_of_customer(customer.id).collect();
    let invoices: Vec<_> = snapshot.invoices_of_customer(customer.id).collect();

    CustomerDetailDto {
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        phone: customer.phone.clone(),
        email: customer.email.clone().unwrap_or_default(),
        address: customer.address.clone(),
        trip_count: trips.len(),
        invoice_count: invoices.len(),
        total_revenue: invoices.iter().map(|i| i.total_amount).sum(),
        total_paid: invoices.iter().map(|i| snapshot.paid_amount(i.id)).sum(),
        remaining_debt: invoices.iter().map(|i| snapshot.outstanding(i)).sum(),
        last_trip_date: trips.iter().map(|t| t.scheduled_date).max(),
        last_invoice_date: invoices.iter().map(|i| i.issue_date).max(),
        is_active: trips.iter().any(|t| t.scheduled_date >= active_since),
    }
}

/// Una fila por cada mes natural con al menos una factura del cliente
fn monthly_rows(snapshot: &ReportSnapshot, customer: &Customer) -> Vec<CustomerRevenueDto> {
    let mut months: BTreeMap<(i32, u32), Vec<&Invoice>> = BTreeMap::new();
    for invoice in snapshot.invoices_of_customer(customer.id) {
        months
            .entry((invoice.issue_date.year(), invoice.issue_date.month()))
            .or_default()
            .push(invoice);
    }

    months
        .into_iter()
        .filter_map(|((year, month), invoices)| {
            let trip_count = snapshot
                .trips_of_customer(customer.id)
                .filter(|t| t.scheduled_date.year() == year && t.scheduled_date.month() == month)
                .count();
            Some(CustomerRevenueDto {
                customer_id: customer.id,
                customer_name: customer.name.clone(),
                period: format!("{}-{:02}", year, month),
                period_date: month_start(year, month)?,
                revenue: invoices.iter().map(|i| i.total_amount).sum(),
                paid: invoices.iter().map(|i| snapshot.paid_amount(i.id)).sum(),
                outstanding: invoices.iter().map(|i| snapshot.outstanding(i)).sum(),
                trip_count,
                invoice_count: invoices.len(),
            })
        })
        .collect()
}

fn debt_row(snapshot: &ReportSnapshot, customer: &Customer, now: DateTime<Utc>) -> CustomerDebtDto {
    let invoices: Vec<_> = snapshot.invoices_of_customer(customer.id).collect();
    let overdue: Vec<_> = invoices.iter().copied().filter(|i| i.is_past_due(now)).collect();
    let oldest = oldest_overdue(overdue.iter().copied(), now);

    CustomerDebtDto {
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        total_debt: invoices.iter().map(|i| i.total_amount).sum(),
        overdue_debt: overdue.iter().map(|i| snapshot.outstanding(i)).sum(),
        total_invoices: invoices.len(),
        overdue_invoices: overdue.len(),
        pending_invoices: invoices.iter().filter(|i| i.status.is_open()).count(),
        oldest_invoice_date: oldest.map(|i| i.due_date),
        days_overdue: days_overdue(oldest, now),
    }
}
