//! Informe detallado de ingresos
//!
//! Resumen, desglose por periodo, por cliente y por viaje, y tendencia frente
//! al periodo inmediatamente anterior.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::HashMap;
use uuid::Uuid;

use super::period::{build_periods, sub_months, PeriodType};
use super::{average, growth_rate, ReportSnapshot};
use crate::dto::report_dto::{
    RevenueByCustomerDto, RevenueByPeriodDto, RevenueByTripDto, RevenueDetailReportDto,
    RevenueSummaryDto, RevenueTrendDto, Trend,
};
use crate::models::{Invoice, InvoiceStatus};

pub fn build(
    snapshot: &ReportSnapshot,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    period: PeriodType,
    now: DateTime<Utc>,
) -> RevenueDetailReportDto {
    let invoices: Vec<&Invoice> = snapshot
        .invoices
        .iter()
        .filter(|i| i.issue_date >= from && i.issue_date <= to)
        .collect();

    let summary = summarize(snapshot, &invoices, now);
    let trend = trend(snapshot, from, to, period, summary.total_revenue);

    RevenueDetailReportDto {
        from_date: from,
        to_date: to,
        revenue_by_period: by_period(snapshot, &invoices, from, to, period),
        revenue_by_customer: by_customer(snapshot, &invoices),
        revenue_by_trip: by_trip(snapshot, &invoices),
        summary,
        trend,
    }
}

fn summarize(snapshot: &ReportSnapshot, invoices: &[&Invoice], now: DateTime<Utc>) -> RevenueSummaryDto {
    let total_revenue: Decimal = invoices.iter().map(|i| i.total_amount).sum();

    RevenueSummaryDto {
        total_revenue,
        total_paid: invoices.iter().map(|i| snapshot.paid_amount(i.id)).sum(),
        total_outstanding: invoices.iter().map(|i| snapshot.outstanding(i)).sum(),
        average_invoice_amount: average(total_revenue, invoices.len()),
        total_invoices: invoices.len(),
        paid_invoices: invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .count(),
        pending_invoices: invoices.iter().filter(|i| i.status.is_open()).count(),
        overdue_invoices: invoices.iter().filter(|i| i.is_past_due(now)).count(),
    }
}

fn by_period(
    snapshot: &ReportSnapshot,
    invoices: &[&Invoice],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    period: PeriodType,
) -> Vec<RevenueByPeriodDto> {
    build_periods(from, to, period)
        .into_iter()
        .map(|bucket| {
            let members: Vec<_> = invoices
                .iter()
                .filter(|i| bucket.contains(i.issue_date))
                .collect();
            RevenueByPeriodDto {
                period: bucket.label,
                period_date: bucket.start,
                revenue: members.iter().map(|i| i.total_amount).sum(),
                paid: members.iter().map(|i| snapshot.paid_amount(i.id)).sum(),
                outstanding: members.iter().map(|i| snapshot.outstanding(i)).sum(),
                invoice_count: members.len(),
            }
        })
        .collect()
}

fn by_customer(snapshot: &ReportSnapshot, invoices: &[&Invoice]) -> Vec<RevenueByCustomerDto> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut rows: HashMap<Uuid, RevenueByCustomerDto> = HashMap::new();

    for invoice in invoices {
        let row = rows.entry(invoice.customer_id).or_insert_with(|| {
            order.push(invoice.customer_id);
            RevenueByCustomerDto {
                customer_id: invoice.customer_id,
                customer_name: snapshot.customer_name(invoice.customer_id),
                total_revenue: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                remaining_debt: Decimal::ZERO,
                invoice_count: 0,
                trip_count: 0,
            }
        });
        row.total_revenue += invoice.total_amount;
        row.total_paid += snapshot.paid_amount(invoice.id);
        row.remaining_debt += snapshot.outstanding(invoice);
        row.invoice_count += 1;
        if invoice.trip_id.is_some() {
            row.trip_count += 1;
        }
    }

    let mut result: Vec<_> = order.into_iter().filter_map(|id| rows.remove(&id)).collect();
    result.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    result
}

fn by_trip(snapshot: &ReportSnapshot, invoices: &[&Invoice]) -> Vec<RevenueByTripDto> {
    let mut rows: Vec<_> = invoices
        .iter()
        .filter_map(|invoice| {
            let trip = snapshot.trip(invoice.trip_id?)?;
            Some(RevenueByTripDto {
                trip_id: trip.id,
                trip_number: trip.trip_number.clone(),
                customer_name: snapshot.customer_name(invoice.customer_id),
                revenue: invoice.total_amount,
                paid: snapshot.paid_amount(invoice.id),
                outstanding: snapshot.outstanding(invoice),
                issue_date: invoice.issue_date,
                status: invoice.status,
            })
        })
        .collect();

    rows.sort_by_key(|r| Reverse(r.issue_date));
    rows
}

/// Inicio de la ventana anterior de igual duración que `[from, to]`
fn previous_window_start(from: DateTime<Utc>, to: DateTime<Utc>, period: PeriodType) -> DateTime<Utc> {
    match period {
        PeriodType::Month => sub_months(from, 1),
        _ => from - Duration::days((to - from).num_days()),
    }
}

fn trend(
    snapshot: &ReportSnapshot,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    period: PeriodType,
    current: Decimal,
) -> RevenueTrendDto {
    let previous_start = previous_window_start(from, to, period);
    let previous: Decimal = snapshot
        .invoices
        .iter()
        .filter(|i| i.issue_date >= previous_start && i.issue_date < from)
        .map(|i| i.total_amount)
        .sum();

    let growth = growth_rate(current, previous);
    let label = if growth > Decimal::ZERO {
        Trend::Up
    } else if growth < Decimal::ZERO {
        Trend::Down
    } else {
        Trend::Stable
    };

    RevenueTrendDto {
        current_period_revenue: current,
        previous_period_revenue: previous,
        growth_rate: growth,
        trend: label,
    }
}
