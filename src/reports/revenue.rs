//! Informe de ingresos por rango de fechas

use chrono::{DateTime, Utc};

use super::ReportSnapshot;
use crate::dto::report_dto::RevenueReportDto;
use crate::models::TripStatus;

/// Facturas emitidas y viajes programados dentro de `[from, to]`
pub fn build(snapshot: &ReportSnapshot, from: DateTime<Utc>, to: DateTime<Utc>) -> RevenueReportDto {
    let in_range = |instant: DateTime<Utc>| instant >= from && instant <= to;

    let invoices: Vec<_> = snapshot
        .invoices
        .iter()
        .filter(|i| in_range(i.issue_date))
        .collect();
    let trips: Vec<_> = snapshot
        .trips
        .iter()
        .filter(|t| in_range(t.scheduled_date))
        .collect();

    RevenueReportDto {
        from_date: from,
        to_date: to,
        total_revenue: invoices.iter().map(|i| i.total_amount).sum(),
        total_paid: invoices.iter().map(|i| snapshot.paid_amount(i.id)).sum(),
        total_outstanding: invoices.iter().map(|i| snapshot.outstanding(i)).sum(),
        total_trips: trips.len(),
        completed_trips: trips
            .iter()
            .filter(|t| t.status == TripStatus::Completed)
            .count(),
    }
}
