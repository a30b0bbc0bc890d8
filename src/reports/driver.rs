//! Informe de conductores

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::cmp::Reverse;

use super::{average, percent, ReportSnapshot};
use crate::dto::report_dto::{DriverPerformanceDto, DriverReportDto, DriverSummaryDto, DriverTripDto};
use crate::models::{Driver, DriverStatus, TripStatus};

const LICENSE_WARNING_DAYS: i64 = 30;
const RECENT_TRIPS: usize = 100;

pub fn build(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> DriverReportDto {
    let count = |status: DriverStatus| snapshot.drivers.iter().filter(|d| d.status == status).count();
    let warning_limit = now + Duration::days(LICENSE_WARNING_DAYS);

    let summary = DriverSummaryDto {
        total_drivers: snapshot.drivers.len(),
        available_drivers: count(DriverStatus::Available),
        on_trip_drivers: count(DriverStatus::OnTrip),
        off_duty_drivers: count(DriverStatus::OffDuty),
        inactive_drivers: count(DriverStatus::Inactive),
        license_expiring_soon: snapshot
            .drivers
            .iter()
            .filter(|d| d.license_expiry_date > now && d.license_expiry_date <= warning_limit)
            .count(),
        license_expired: snapshot
            .drivers
            .iter()
            .filter(|d| d.license_expiry_date < now)
            .count(),
    };

    let mut driver_performance: Vec<_> = snapshot
        .drivers
        .iter()
        .map(|d| performance_row(snapshot, d, now))
        .collect();
    driver_performance.sort_by(|a, b| b.total_trips.cmp(&a.total_trips));

    DriverReportDto {
        summary,
        driver_performance,
        driver_trips: recent_trips(snapshot),
    }
}

fn performance_row(snapshot: &ReportSnapshot, driver: &Driver, now: DateTime<Utc>) -> DriverPerformanceDto {
    let trips: Vec<_> = snapshot.trips_of_driver(driver.id).collect();
    let completed = trips.iter().filter(|t| t.status == TripStatus::Completed).count();
    let total_distance: Decimal = trips.iter().map(|t| t.distance).sum();
    let days_until_expiry = (driver.license_expiry_date - now).num_days();

    DriverPerformanceDto {
        driver_id: driver.id,
        driver_name: driver.full_name.clone(),
        license_number: driver.license_number.clone(),
        status: driver.status,
        total_trips: trips.len(),
        completed_trips: completed,
        in_progress_trips: trips
            .iter()
            .filter(|t| t.status == TripStatus::InProgress)
            .count(),
        completion_rate: percent(Decimal::from(completed), Decimal::from(trips.len())),
        total_distance,
        average_distance: average(total_distance, trips.len()),
        total_revenue: trips.iter().map(|t| snapshot.trip_revenue(t.id)).sum(),
        license_expiry_date: driver.license_expiry_date,
        days_until_license_expiry: days_until_expiry,
        is_license_expiring_soon: days_until_expiry > 0 && days_until_expiry <= LICENSE_WARNING_DAYS,
        is_license_expired: days_until_expiry < 0,
    }
}

fn recent_trips(snapshot: &ReportSnapshot) -> Vec<DriverTripDto> {
    let mut trips: Vec<_> = snapshot.trips.iter().collect();
    trips.sort_by_key(|t| Reverse(t.scheduled_date));

    trips
        .into_iter()
        .take(RECENT_TRIPS)
        .map(|t| {
            let driver_name = snapshot
                .drivers
                .iter()
                .find(|d| d.id == t.driver_id)
                .map(|d| d.full_name.clone())
                .unwrap_or_default();
            DriverTripDto {
                driver_id: t.driver_id,
                driver_name,
                trip_id: t.id,
                trip_number: t.trip_number.clone(),
                customer_name: snapshot.customer_name(t.customer_id),
                origin: t.origin.clone(),
                destination: t.destination.clone(),
                status: t.status,
                scheduled_date: t.scheduled_date,
                actual_start_date: t.actual_start_date,
                actual_end_date: t.actual_end_date,
                distance: t.distance,
                revenue: snapshot.trip_revenue(t.id),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, TruckStatus};
    use crate::reports::fixtures::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_license_windows() {
        let soon = driver("Soon", DriverStatus::Available, now() + Duration::days(10));
        let expired = driver("Expired", DriverStatus::OffDuty, now() - Duration::days(3));
        let fine = driver("Fine", DriverStatus::Inactive, now() + Duration::days(200));

        let snapshot = ReportSnapshot::new(vec![], vec![], vec![soon, expired, fine], vec![], vec![], vec![]);
        let report = build(&snapshot, now());

        assert_eq!(report.summary.total_drivers, 3);
        assert_eq!(report.summary.license_expiring_soon, 1);
        assert_eq!(report.summary.license_expired, 1);
        assert_eq!(report.summary.off_duty_drivers, 1);

        let by_name = |name: &str| {
            report
                .driver_performance
                .iter()
                .find(|p| p.driver_name == name)
                .unwrap()
                .clone()
        };
        assert!(by_name("Soon").is_license_expiring_soon);
        assert_eq!(by_name("Soon").days_until_license_expiry, 10);
        assert!(by_name("Expired").is_license_expired);
        assert_eq!(by_name("Expired").days_until_license_expiry, -3);
        assert!(!by_name("Fine").is_license_expiring_soon);
    }

    #[test]
    fn test_performance_and_recent_trips() {
        let c = customer("A");
        let t = truck("43C-1", TruckStatus::InUse, None);
        let busy = driver("Busy", DriverStatus::OnTrip, at(2030, 1, 1));
        let quiet = driver("Quiet", DriverStatus::Available, at(2030, 1, 1));

        let trips = vec![
            trip(&c, &t, &busy, at(2024, 7, 1), TripStatus::Completed, 100),
            trip(&c, &t, &busy, at(2024, 7, 2), TripStatus::Completed, 50),
            trip(&c, &t, &busy, at(2024, 7, 3), TripStatus::InProgress, 30),
        ];
        let inv = invoice(&c, Some(&trips[0]), at(2024, 7, 2), at(2024, 8, 2), dec!(700), InvoiceStatus::Pending);
        let newest = trips[2].id;

        let snapshot = ReportSnapshot::new(vec![c], vec![t], vec![quiet, busy], trips, vec![inv], vec![]);
        let report = build(&snapshot, now());

        let top = &report.driver_performance[0];
        assert_eq!(top.driver_name, "Busy");
        assert_eq!(top.total_trips, 3);
        assert_eq!(top.in_progress_trips, 1);
        assert_eq!(top.completion_rate, dec!(66.67));
        assert_eq!(top.average_distance, dec!(60));
        assert_eq!(top.total_revenue, dec!(700));
        assert_eq!(report.driver_performance[1].completion_rate, Decimal::ZERO);

        assert_eq!(report.driver_trips.len(), 3);
        assert_eq!(report.driver_trips[0].trip_id, newest);
        assert_eq!(report.driver_trips[2].revenue, dec!(700));
        assert_eq!(report.driver_trips[0].driver_name, "Busy");
    }
}
