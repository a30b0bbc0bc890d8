//! Panel principal
//!
//! Los ingresos del panel son cobros (pagos), agrupados por la fecha de
//! emisión de la factura a la que se aplican. Las semanas empiezan en domingo.

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use std::cmp::Reverse;

use super::period::{add_months, day_start, month_start, sub_months};
use super::{average, growth_rate, ReportSnapshot};
use crate::dto::report_dto::{
    DashboardDebtDto, DashboardDto, DashboardRecentTripDto, DashboardRevenueDto,
    DashboardSummaryDto, DashboardTopCustomerDto, DashboardTripDto, DashboardTruckStatusDto,
};
use crate::models::{InvoiceStatus, TripStatus, TruckStatus};

const RECENT_TRIPS: usize = 10;
const TOP_CUSTOMERS: usize = 10;

/// Intervalo semiabierto `[start, end)`
#[derive(Debug, Clone, Copy)]
struct Range {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Range {
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Límites de calendario relativos a `now`
struct CalendarRanges {
    today: Range,
    this_week: Range,
    this_month: Range,
    this_year: Range,
    last_month: Range,
}

impl CalendarRanges {
    fn around(now: DateTime<Utc>) -> Self {
        let today = day_start(now);
        let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
        let month = month_start(now.year(), now.month()).unwrap_or(today);
        let year = month_start(now.year(), 1).unwrap_or(month);

        Self {
            today: Range { start: today, end: today + Duration::days(1) },
            this_week: Range { start: week_start, end: week_start + Duration::days(7) },
            this_month: Range { start: month, end: add_months(month, 1) },
            this_year: Range { start: year, end: add_months(year, 12) },
            last_month: Range { start: sub_months(month, 1), end: month },
        }
    }
}

pub fn build(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> DashboardDto {
    let ranges = CalendarRanges::around(now);

    let outstanding_total: Decimal = snapshot
        .invoices
        .iter()
        .map(|i| snapshot.outstanding(i))
        .sum();
    let pending_invoices = snapshot
        .invoices
        .iter()
        .filter(|i| i.status.is_open())
        .count();

    let summary = DashboardSummaryDto {
        total_customers: snapshot.customers.len(),
        total_trucks: snapshot.trucks.len(),
        total_drivers: snapshot.drivers.len(),
        active_trips: count_trips(snapshot, TripStatus::InProgress),
        pending_invoices,
        total_outstanding_debt: outstanding_total,
    };

    let collected_in = |range: Range| -> Decimal {
        snapshot
            .invoices
            .iter()
            .filter(|i| range.contains(i.issue_date))
            .map(|i| snapshot.paid_amount(i.id))
            .sum()
    };
    let this_month_revenue = collected_in(ranges.this_month);
    let last_month_revenue = collected_in(ranges.last_month);

    let revenue = DashboardRevenueDto {
        today_revenue: collected_in(ranges.today),
        this_week_revenue: collected_in(ranges.this_week),
        this_month_revenue,
        this_year_revenue: collected_in(ranges.this_year),
        last_month_revenue,
        revenue_growth: growth_rate(this_month_revenue, last_month_revenue),
    };

    let scheduled_in = |range: Range| {
        snapshot
            .trips
            .iter()
            .filter(|t| range.contains(t.scheduled_date))
            .count()
    };
    let total_distance: Decimal = snapshot.trips.iter().map(|t| t.distance).sum();

    let trips = DashboardTripDto {
        today_trips: scheduled_in(ranges.today),
        this_week_trips: scheduled_in(ranges.this_week),
        this_month_trips: scheduled_in(ranges.this_month),
        completed_trips: count_trips(snapshot, TripStatus::Completed),
        in_progress_trips: count_trips(snapshot, TripStatus::InProgress),
        scheduled_trips: count_trips(snapshot, TripStatus::Scheduled),
        average_distance: average(total_distance, snapshot.trips.len()),
        total_distance,
    };

    let overdue: Vec<_> = snapshot
        .invoices
        .iter()
        .filter(|i| i.is_past_due(now))
        .collect();

    let debt = DashboardDebtDto {
        total_debt: outstanding_total,
        overdue_debt: overdue.iter().map(|i| snapshot.outstanding(i)).sum(),
        overdue_invoices: overdue.len(),
        pending_invoices,
        paid_invoices: snapshot
            .invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .count(),
    };

    DashboardDto {
        summary,
        revenue,
        trips,
        debt,
        recent_trips: recent_trips(snapshot),
        top_customers: top_customers(snapshot),
        truck_status: truck_status(snapshot, now),
    }
}

fn count_trips(snapshot: &ReportSnapshot, status: TripStatus) -> usize {
    snapshot.trips.iter().filter(|t| t.status == status).count()
}

fn recent_trips(snapshot: &ReportSnapshot) -> Vec<DashboardRecentTripDto> {
    let mut trips: Vec<_> = snapshot.trips.iter().collect();
    trips.sort_by_key(|t| Reverse(t.scheduled_date));

    trips
        .into_iter()
        .take(RECENT_TRIPS)
        .map(|t| DashboardRecentTripDto {
            id: t.id,
            trip_number: t.trip_number.clone(),
            customer_name: snapshot.customer_name(t.customer_id),
            origin: t.origin.clone(),
            destination: t.destination.clone(),
            status: t.status,
            scheduled_date: t.scheduled_date,
            distance: t.distance,
        })
        .collect()
}

fn top_customers(snapshot: &ReportSnapshot) -> Vec<DashboardTopCustomerDto> {
    let mut rows: Vec<_> = snapshot
        .customers
        .iter()
        .map(|c| {
            let invoices: Vec<_> = snapshot.invoices_of_customer(c.id).collect();
            DashboardTopCustomerDto {
                customer_id: c.id,
                customer_name: c.name.clone(),
                total_revenue: invoices.iter().map(|i| i.total_amount).sum(),
                trip_count: snapshot.trips_of_customer(c.id).count(),
                remaining_debt: invoices.iter().map(|i| snapshot.outstanding(i)).sum(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    rows.truncate(TOP_CUSTOMERS);
    rows
}

fn truck_status(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> Vec<DashboardTruckStatusDto> {
    TruckStatus::ALL
        .into_iter()
        .filter_map(|status| {
            let trucks: Vec<_> = snapshot
                .trucks
                .iter()
                .filter(|t| t.status == status)
                .collect();
            if trucks.is_empty() {
                return None;
            }
            Some(DashboardTruckStatusDto {
                status,
                count: trucks.len(),
                maintenance_due: trucks.iter().filter(|t| t.is_maintenance_due(now)).count(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DriverStatus;
    use crate::reports::fixtures::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        // Jueves
        Utc.with_ymd_and_hms(2024, 5, 16, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let dashboard = build(&ReportSnapshot::default(), now());

        assert_eq!(dashboard.summary.total_customers, 0);
        assert_eq!(dashboard.summary.total_outstanding_debt, Decimal::ZERO);
        assert_eq!(dashboard.revenue.revenue_growth, Decimal::ZERO);
        assert_eq!(dashboard.trips.average_distance, Decimal::ZERO);
        assert!(dashboard.recent_trips.is_empty());
        assert!(dashboard.top_customers.is_empty());
        assert!(dashboard.truck_status.is_empty());
    }

    #[test]
    fn test_revenue_buckets_use_payments() {
        let c = customer("Công ty A");
        let today_inv = invoice(&c, None, now() - Duration::hours(2), at(2024, 6, 1), dec!(1000), InvoiceStatus::Partial);
        let monday_inv = invoice(&c, None, at(2024, 5, 13), at(2024, 6, 1), dec!(500), InvoiceStatus::Paid);
        let early_month = invoice(&c, None, at(2024, 5, 2), at(2024, 6, 1), dec!(300), InvoiceStatus::Paid);
        let last_month = invoice(&c, None, at(2024, 4, 30) + Duration::hours(23), at(2024, 5, 30), dec!(200), InvoiceStatus::Paid);

        let payments = vec![
            payment(&today_inv, dec!(400), now()),
            payment(&monday_inv, dec!(500), now()),
            payment(&early_month, dec!(300), now()),
            payment(&last_month, dec!(200), now()),
        ];
        let snapshot = ReportSnapshot::new(
            vec![c],
            vec![],
            vec![],
            vec![],
            vec![today_inv, monday_inv, early_month, last_month],
            payments,
        );

        let revenue = build(&snapshot, now()).revenue;
        assert_eq!(revenue.today_revenue, dec!(400));
        assert_eq!(revenue.this_week_revenue, dec!(900));
        assert_eq!(revenue.this_month_revenue, dec!(1200));
        assert_eq!(revenue.last_month_revenue, dec!(200));
        assert_eq!(revenue.this_year_revenue, dec!(1400));
        assert_eq!(revenue.revenue_growth, dec!(500));
    }

    #[test]
    fn test_growth_is_zero_without_last_month_revenue() {
        let c = customer("B");
        let inv = invoice(&c, None, at(2024, 5, 3), at(2024, 6, 1), dec!(1000), InvoiceStatus::Paid);
        let pay = payment(&inv, dec!(1000), at(2024, 5, 3));
        let snapshot = ReportSnapshot::new(vec![c], vec![], vec![], vec![], vec![inv], vec![pay]);

        let revenue = build(&snapshot, now()).revenue;
        assert_eq!(revenue.this_month_revenue, dec!(1000));
        assert_eq!(revenue.revenue_growth, Decimal::ZERO);
    }

    #[test]
    fn test_debt_and_truck_status() {
        let c = customer("C");
        let overdue = invoice(&c, None, at(2024, 4, 1), at(2024, 5, 1), dec!(800), InvoiceStatus::Partial);
        let pending = invoice(&c, None, at(2024, 5, 10), at(2024, 6, 10), dec!(100), InvoiceStatus::Pending);
        let pay = payment(&overdue, dec!(300), at(2024, 4, 15));

        let due_soon = truck("29C-1", TruckStatus::Available, Some(now() + Duration::days(3)));
        let no_date = truck("29C-2", TruckStatus::Available, None);
        let in_use = truck("29C-3", TruckStatus::InUse, Some(now() + Duration::days(30)));

        let snapshot = ReportSnapshot::new(
            vec![c],
            vec![due_soon, no_date, in_use],
            vec![],
            vec![],
            vec![overdue, pending],
            vec![pay],
        );
        let dashboard = build(&snapshot, now());

        assert_eq!(dashboard.debt.total_debt, dec!(600));
        assert_eq!(dashboard.debt.overdue_debt, dec!(500));
        assert_eq!(dashboard.debt.overdue_invoices, 1);
        assert_eq!(dashboard.debt.pending_invoices, 2);
        assert_eq!(dashboard.summary.pending_invoices, 2);

        assert_eq!(dashboard.truck_status.len(), 2);
        assert_eq!(dashboard.truck_status[0].status, TruckStatus::Available);
        assert_eq!(dashboard.truck_status[0].count, 2);
        assert_eq!(dashboard.truck_status[0].maintenance_due, 1);
        assert_eq!(dashboard.truck_status[1].maintenance_due, 0);
    }

    #[test]
    fn test_recent_trips_and_top_customers() {
        let big = customer("Big");
        let small = customer("Small");
        let t = truck("29C-9", TruckStatus::InUse, None);
        let d = driver("Lan", DriverStatus::OnTrip, at(2030, 1, 1));

        let trips: Vec<_> = (1..=12)
            .map(|day| trip(&big, &t, &d, at(2024, 5, day), TripStatus::Completed, 10))
            .collect();
        let newest = trips[11].id;
        let invoices = vec![
            invoice(&big, None, at(2024, 5, 1), at(2024, 6, 1), dec!(5000), InvoiceStatus::Pending),
            invoice(&small, None, at(2024, 5, 1), at(2024, 6, 1), dec!(100), InvoiceStatus::Pending),
        ];

        let snapshot = ReportSnapshot::new(vec![small, big], vec![t], vec![d], trips, invoices, vec![]);
        let dashboard = build(&snapshot, now());

        assert_eq!(dashboard.recent_trips.len(), 10);
        assert_eq!(dashboard.recent_trips[0].id, newest);
        assert_eq!(dashboard.recent_trips[0].customer_name, "Big");
        assert_eq!(dashboard.top_customers[0].customer_name, "Big");
        assert_eq!(dashboard.top_customers[0].trip_count, 12);
        assert_eq!(dashboard.top_customers[0].remaining_debt, dec!(5000));
        assert_eq!(dashboard.trips.total_distance, dec!(120));
        assert_eq!(dashboard.trips.average_distance, dec!(10));
        // El domingo 12 abre la semana del jueves 16
        assert_eq!(dashboard.trips.this_week_trips, 1);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        let monday = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();
        let c = customer("D");
        let sunday_inv = invoice(&c, None, at(2024, 5, 19) + Duration::hours(15), at(2024, 6, 19), dec!(100), InvoiceStatus::Paid);
        let saturday_inv = invoice(&c, None, at(2024, 5, 18) + Duration::hours(15), at(2024, 6, 18), dec!(50), InvoiceStatus::Paid);
        let payments = vec![
            payment(&sunday_inv, dec!(100), monday),
            payment(&saturday_inv, dec!(50), monday),
        ];
        let snapshot = ReportSnapshot::new(vec![c], vec![], vec![], vec![], vec![sunday_inv, saturday_inv], payments);

        let revenue = build(&snapshot, monday).revenue;
        assert_eq!(revenue.this_week_revenue, dec!(100));
        assert_eq!(revenue.today_revenue, Decimal::ZERO);
    }
}
