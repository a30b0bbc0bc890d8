//! Informe de flota
//!
//! Sin filtro de fechas. La utilización de cada camión se mide desde su alta
//! hasta hoy.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::utilization::{days_in_use, utilization_rate, DayWindow};
use super::{average, percent, ReportSnapshot};
use crate::dto::report_dto::{
    TruckMaintenanceDto, TruckPerformanceDto, TruckReportDto, TruckSummaryDto, TruckUtilizationDto,
};
use crate::models::{Truck, TruckStatus};

pub fn build(snapshot: &ReportSnapshot, now: DateTime<Utc>) -> TruckReportDto {
    let count = |status: TruckStatus| snapshot.trucks.iter().filter(|t| t.status == status).count();

    let mut truck_utilization: Vec<_> = snapshot
        .trucks
        .iter()
        .map(|truck| utilization_row(snapshot, truck, now))
        .collect();
    truck_utilization.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));

    let utilization_sum: Decimal = truck_utilization.iter().map(|u| u.utilization_rate).sum();

    let summary = TruckSummaryDto {
        total_trucks: snapshot.trucks.len(),
        available_trucks: count(TruckStatus::Available),
        in_use_trucks: count(TruckStatus::InUse),
        maintenance_trucks: count(TruckStatus::Maintenance),
        inactive_trucks: count(TruckStatus::Inactive),
        maintenance_due: snapshot.trucks.iter().filter(|t| t.is_maintenance_due(now)).count(),
        maintenance_overdue: snapshot
            .trucks
            .iter()
            .filter(|t| t.is_maintenance_overdue(now))
            .count(),
        average_utilization: average(utilization_sum, truck_utilization.len()),
    };

    let mut maintenance_schedule: Vec<_> = snapshot
        .trucks
        .iter()
        .map(|t| TruckMaintenanceDto {
            truck_id: t.id,
            license_plate: t.license_plate.clone(),
            brand: t.brand.clone(),
            model: t.model.clone(),
            last_maintenance_date: t.last_maintenance_date,
            next_maintenance_date: t.next_maintenance_date,
            maintenance_interval_days: t.maintenance_interval_days,
            days_until_maintenance: t
                .next_maintenance_date
                .map_or(0, |next| (next - now).num_days()),
            is_overdue: t.is_maintenance_overdue(now),
            status: t.status,
        })
        .collect();
    // Los camiones sin fecha programada van primero
    maintenance_schedule.sort_by_key(|m| m.next_maintenance_date);

    let mut performance: Vec<_> = snapshot
        .trucks
        .iter()
        .map(|truck| performance_row(snapshot, truck))
        .collect();
    performance.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

    TruckReportDto {
        summary,
        truck_utilization,
        maintenance_schedule,
        performance,
    }
}

fn utilization_row(snapshot: &ReportSnapshot, truck: &Truck, now: DateTime<Utc>) -> TruckUtilizationDto {
    let trips: Vec<_> = snapshot.trips_of_truck(truck.id).collect();
    let today = now.date_naive();
    let (days, rate) = DayWindow::new(truck.created_at.date_naive(), today)
        .map(|window| {
            let days = days_in_use(trips.iter().copied(), window, today);
            (days, utilization_rate(days, window))
        })
        .unwrap_or((0, Decimal::ZERO));

    TruckUtilizationDto {
        truck_id: truck.id,
        license_plate: truck.license_plate.clone(),
        brand: truck.brand.clone(),
        model: truck.model.clone(),
        status: truck.status,
        trip_count: trips.len(),
        days_in_use: days,
        utilization_rate: rate,
        total_distance: trips.iter().map(|t| t.distance).sum(),
        total_revenue: trips.iter().map(|t| snapshot.trip_revenue(t.id)).sum(),
    }
}

fn performance_row(snapshot: &ReportSnapshot, truck: &Truck) -> TruckPerformanceDto {
    let trips: Vec<_> = snapshot.trips_of_truck(truck.id).collect();
    let total_distance: Decimal = trips.iter().map(|t| t.distance).sum();
    let total_fuel_cost: Decimal = trips.iter().filter_map(|t| t.fuel_cost).sum();
    let total_revenue: Decimal = trips.iter().map(|t| snapshot.trip_revenue(t.id)).sum();

    let average_fuel_cost_per_km = if total_distance > Decimal::ZERO {
        (total_fuel_cost / total_distance).round_dp(2)
    } else {
        Decimal::ZERO
    };

    TruckPerformanceDto {
        truck_id: truck.id,
        license_plate: truck.license_plate.clone(),
        trip_count: trips.len(),
        total_distance,
        total_fuel_cost,
        average_fuel_cost_per_km,
        total_revenue,
        profit_margin: percent(total_revenue - total_fuel_cost, total_revenue),
        average_trip_distance: average(total_distance, trips.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, InvoiceStatus, TripStatus};
    use crate::reports::fixtures::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_maintenance_flags_ignore_trucks_without_date() {
        let overdue = truck("29C-1", TruckStatus::Available, Some(now() - Duration::days(2)));
        let due = truck("29C-2", TruckStatus::InUse, Some(now() + Duration::days(5)));
        let later = truck("29C-3", TruckStatus::Maintenance, Some(now() + Duration::days(40)));
        let none = truck("29C-4", TruckStatus::Inactive, None);

        let snapshot = ReportSnapshot::new(vec![], vec![later, none, due, overdue], vec![], vec![], vec![], vec![]);
        let report = build(&snapshot, now());

        assert_eq!(report.summary.total_trucks, 4);
        assert_eq!(report.summary.maintenance_overdue, 1);
        assert_eq!(report.summary.maintenance_due, 2);
        assert_eq!(report.summary.inactive_trucks, 1);

        let plates: Vec<_> = report
            .maintenance_schedule
            .iter()
            .map(|m| m.license_plate.as_str())
            .collect();
        assert_eq!(plates, vec!["29C-4", "29C-1", "29C-2", "29C-3"]);
        assert_eq!(report.maintenance_schedule[0].days_until_maintenance, 0);
        assert_eq!(report.maintenance_schedule[1].days_until_maintenance, -2);
        assert!(report.maintenance_schedule[1].is_overdue);
        assert_eq!(report.maintenance_schedule[2].days_until_maintenance, 5);
    }

    #[test]
    fn test_performance_and_utilization() {
        let c = customer("A");
        let busy = truck("51C-1", TruckStatus::InUse, None);
        let idle = truck("51C-2", TruckStatus::Available, None);
        let d = driver("Khoa", DriverStatus::OnTrip, at(2030, 1, 1));

        let mut run = trip(&c, &busy, &d, at(2024, 3, 1), TripStatus::Completed, 200);
        run.fuel_cost = Some(dec!(100));
        run.actual_start_date = Some(at(2024, 3, 1));
        run.actual_end_date = Some(at(2024, 3, 2));
        let inv = invoice(&c, Some(&run), at(2024, 3, 2), at(2024, 4, 2), dec!(400), InvoiceStatus::Pending);

        let snapshot = ReportSnapshot::new(vec![c], vec![idle, busy], vec![d], vec![run], vec![inv], vec![]);
        let report = build(&snapshot, now());

        let top = &report.performance[0];
        assert_eq!(top.license_plate, "51C-1");
        assert_eq!(top.average_fuel_cost_per_km, dec!(0.5));
        assert_eq!(top.profit_margin, dec!(75));
        assert_eq!(top.average_trip_distance, dec!(200));
        assert_eq!(report.performance[1].profit_margin, Decimal::ZERO);
        assert_eq!(report.performance[1].average_fuel_cost_per_km, Decimal::ZERO);

        let util = &report.truck_utilization[0];
        assert_eq!(util.license_plate, "51C-1");
        assert_eq!(util.days_in_use, 2);
        // 2 días de 70 (1 ene a 10 mar incluidos)
        assert_eq!(util.utilization_rate, dec!(2.86));
        assert_eq!(report.truck_utilization[1].days_in_use, 0);
        assert_eq!(report.summary.average_utilization, dec!(1.43));
    }

    #[test]
    fn test_empty() {
        let report = build(&ReportSnapshot::default(), now());
        assert_eq!(report.summary.average_utilization, Decimal::ZERO);
        assert!(report.performance.is_empty());
    }
}
