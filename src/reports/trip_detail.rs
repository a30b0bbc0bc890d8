//! Informe detallado de viajes
//!
//! Viajes programados dentro de `[from, to]`, agrupados por estado, mes,
//! camión, conductor y cliente. La utilización de camiones y conductores se
//! calcula sobre los días del propio rango.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use uuid::Uuid;

use super::period::month_start;
use super::utilization::{days_in_use, utilization_rate, DayWindow};
use super::{average, ReportSnapshot};
use crate::dto::report_dto::{
    TripByCustomerDto, TripByDriverDto, TripByPeriodDto, TripByStatusDto, TripByTruckDto,
    TripDetailReportDto, TripSummaryDto,
};
use crate::models::{Trip, TripStatus};

/// Agregado común a todas las agrupaciones
#[derive(Debug, Default)]
struct Tally<'a> {
    trips: Vec<&'a Trip>,
    completed: usize,
    distance: Decimal,
    revenue: Decimal,
}

impl<'a> Tally<'a> {
    fn add(&mut self, trip: &'a Trip, revenue: Decimal) {
        self.trips.push(trip);
        if trip.status == TripStatus::Completed {
            self.completed += 1;
        }
        self.distance += trip.distance;
        self.revenue += revenue;
    }

    fn count(&self) -> usize {
        self.trips.len()
    }
}

/// Agrupa conservando el orden de primera aparición
fn group_by<'a, K, F>(snapshot: &ReportSnapshot, trips: &[&'a Trip], key: F) -> Vec<(K, Tally<'a>)>
where
    K: Eq + Hash + Copy,
    F: Fn(&Trip) -> K,
{
    let mut order = Vec::new();
    let mut groups: HashMap<K, Tally<'a>> = HashMap::new();

    for &trip in trips {
        let k = key(trip);
        groups
            .entry(k)
            .or_insert_with(|| {
                order.push(k);
                Tally::default()
            })
            .add(trip, snapshot.trip_revenue(trip.id));
    }

    order
        .into_iter()
        .filter_map(|k| groups.remove(&k).map(|tally| (k, tally)))
        .collect()
}

pub fn build(
    snapshot: &ReportSnapshot,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TripDetailReportDto {
    let trips: Vec<&Trip> = snapshot
        .trips
        .iter()
        .filter(|t| t.scheduled_date >= from && t.scheduled_date <= to)
        .collect();
    let window = DayWindow::new(from.date_naive(), to.date_naive());
    let today = now.date_naive();
    let rate = |group: &[&Trip]| {
        window.map_or(Decimal::ZERO, |w| {
            utilization_rate(days_in_use(group.iter().copied(), w, today), w)
        })
    };

    let trips_by_truck = {
        let mut rows: Vec<_> = group_by(snapshot, &trips, |t| t.truck_id)
            .into_iter()
            .filter_map(|(truck_id, tally)| {
                let truck = snapshot.trucks.iter().find(|t| t.id == truck_id)?;
                Some(TripByTruckDto {
                    truck_id,
                    license_plate: truck.license_plate.clone(),
                    brand: truck.brand.clone(),
                    model: truck.model.clone(),
                    trip_count: tally.count(),
                    completed_count: tally.completed,
                    total_distance: tally.distance,
                    total_revenue: tally.revenue,
                    utilization_rate: rate(&tally.trips),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));
        rows
    };

    let trips_by_driver = {
        let mut rows: Vec<_> = group_by(snapshot, &trips, |t| t.driver_id)
            .into_iter()
            .filter_map(|(driver_id, tally)| {
                let driver = snapshot.drivers.iter().find(|d| d.id == driver_id)?;
                Some(TripByDriverDto {
                    driver_id,
                    driver_name: driver.full_name.clone(),
                    license_number: driver.license_number.clone(),
                    trip_count: tally.count(),
                    completed_count: tally.completed,
                    total_distance: tally.distance,
                    total_revenue: tally.revenue,
                    utilization_rate: rate(&tally.trips),
                    average_rating: Decimal::ZERO,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));
        rows
    };

    let trips_by_customer = {
        let mut rows: Vec<_> = group_by(snapshot, &trips, |t| t.customer_id)
            .into_iter()
            .map(|(customer_id, tally)| TripByCustomerDto {
                customer_id,
                customer_name: snapshot.customer_name(customer_id),
                trip_count: tally.count(),
                completed_count: tally.completed,
                total_distance: tally.distance,
                total_revenue: tally.revenue,
                average_revenue: average(tally.revenue, tally.count()),
            })
            .collect();
        rows.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));
        rows
    };

    TripDetailReportDto {
        from_date: from,
        to_date: to,
        summary: summarize(snapshot, &trips),
        trips_by_status: by_status(snapshot, &trips),
        trips_by_period: by_month(snapshot, &trips),
        trips_by_truck,
        trips_by_driver,
        trips_by_customer,
    }
}

fn summarize(snapshot: &ReportSnapshot, trips: &[&Trip]) -> TripSummaryDto {
    let count = |status: TripStatus| trips.iter().filter(|t| t.status == status).count();
    let total_distance: Decimal = trips.iter().map(|t| t.distance).sum();
    let total_fuel_cost: Decimal = trips.iter().filter_map(|t| t.fuel_cost).sum();
    let total_revenue: Decimal = trips.iter().map(|t| snapshot.trip_revenue(t.id)).sum();

    TripSummaryDto {
        total_trips: trips.len(),
        completed_trips: count(TripStatus::Completed),
        in_progress_trips: count(TripStatus::InProgress),
        scheduled_trips: count(TripStatus::Scheduled),
        cancelled_trips: count(TripStatus::Cancelled),
        total_distance,
        average_distance: average(total_distance, trips.len()),
        total_fuel_cost,
        average_fuel_cost: average(total_fuel_cost, trips.len()),
        total_other_costs: trips.iter().filter_map(|t| t.other_costs).sum(),
        total_revenue,
        average_revenue: average(total_revenue, trips.len()),
    }
}

fn by_status(snapshot: &ReportSnapshot, trips: &[&Trip]) -> Vec<TripByStatusDto> {
    group_by(snapshot, trips, |t| t.status)
        .into_iter()
        .map(|(status, tally)| TripByStatusDto {
            status,
            count: tally.count(),
            total_distance: tally.distance,
            average_distance: average(tally.distance, tally.count()),
            total_revenue: tally.revenue,
        })
        .collect()
}

fn by_month(snapshot: &ReportSnapshot, trips: &[&Trip]) -> Vec<TripByPeriodDto> {
    let mut months: BTreeMap<(i32, u32), Tally> = BTreeMap::new();
    for &trip in trips {
        let key = (trip.scheduled_date.year(), trip.scheduled_date.month());
        months
            .entry(key)
            .or_default()
            .add(trip, snapshot.trip_revenue(trip.id));
    }

    months
        .into_iter()
        .filter_map(|((year, month), tally)| {
            Some(TripByPeriodDto {
                period: format!("{}-{:02}", year, month),
                period_date: month_start(year, month)?,
                trip_count: tally.count(),
                completed_count: tally.completed,
                total_distance: tally.distance,
                total_revenue: tally.revenue,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, InvoiceStatus, TruckStatus};
    use crate::reports::fixtures::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_and_groupings() {
        let a = customer("A");
        let b = customer("B");
        let t1 = truck("29C-1", TruckStatus::InUse, None);
        let t2 = truck("29C-2", TruckStatus::Available, None);
        let d1 = driver("Bình", DriverStatus::OnTrip, at(2030, 1, 1));

        let mut first = trip(&a, &t1, &d1, at(2024, 1, 10), TripStatus::Completed, 100);
        first.fuel_cost = Some(dec!(30));
        first.other_costs = Some(dec!(5));
        let second = trip(&a, &t1, &d1, at(2024, 2, 5), TripStatus::InProgress, 50);
        let third = trip(&b, &t2, &d1, at(2024, 1, 20), TripStatus::Cancelled, 10);
        let outside = trip(&b, &t2, &d1, at(2024, 6, 1), TripStatus::Completed, 999);

        let invoices = vec![
            invoice(&a, Some(&first), at(2024, 1, 11), at(2024, 2, 11), dec!(600), InvoiceStatus::Pending),
            invoice(&a, Some(&first), at(2024, 1, 12), at(2024, 2, 12), dec!(400), InvoiceStatus::Pending),
        ];
        let snapshot = ReportSnapshot::new(
            vec![a, b],
            vec![t1, t2],
            vec![d1],
            vec![first, second, third, outside],
            invoices,
            vec![],
        );

        let report = build(&snapshot, at(2024, 1, 1), at(2024, 3, 31), at(2024, 4, 1));

        assert_eq!(report.summary.total_trips, 3);
        assert_eq!(report.summary.completed_trips, 1);
        assert_eq!(report.summary.cancelled_trips, 1);
        assert_eq!(report.summary.total_distance, dec!(160));
        assert_eq!(report.summary.total_fuel_cost, dec!(30));
        assert_eq!(report.summary.average_fuel_cost, dec!(10));
        assert_eq!(report.summary.total_other_costs, dec!(5));
        assert_eq!(report.summary.total_revenue, dec!(1000));

        let periods: Vec<_> = report.trips_by_period.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02"]);
        assert_eq!(report.trips_by_period[0].trip_count, 2);
        assert_eq!(report.trips_by_period[0].total_revenue, dec!(1000));

        assert_eq!(report.trips_by_truck[0].license_plate, "29C-1");
        assert_eq!(report.trips_by_truck[0].trip_count, 2);
        assert!(report.trips_by_truck[0].utilization_rate > Decimal::ZERO);

        assert_eq!(report.trips_by_driver.len(), 1);
        assert_eq!(report.trips_by_driver[0].average_rating, Decimal::ZERO);

        assert_eq!(report.trips_by_customer[0].customer_name, "A");
        assert_eq!(report.trips_by_customer[0].average_revenue, dec!(500));
        assert_eq!(report.trips_by_status.len(), 3);
    }

    #[test]
    fn test_empty_range() {
        let report = build(&ReportSnapshot::default(), at(2024, 1, 1), at(2024, 1, 31), at(2024, 2, 1));
        assert_eq!(report.summary.total_trips, 0);
        assert_eq!(report.summary.average_revenue, Decimal::ZERO);
        assert!(report.trips_by_period.is_empty());
        assert!(report.trips_by_truck.is_empty());
    }
}
