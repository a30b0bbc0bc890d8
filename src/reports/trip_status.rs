//! Viajes agrupados por estado

use rust_decimal::Decimal;

use super::ReportSnapshot;
use crate::dto::report_dto::TripStatusReportDto;
use crate::models::TripStatus;

pub fn build(snapshot: &ReportSnapshot) -> Vec<TripStatusReportDto> {
    TripStatus::ALL
        .into_iter()
        .filter_map(|status| {
            let (count, total_distance) = snapshot
                .trips
                .iter()
                .filter(|t| t.status == status)
                .fold((0usize, Decimal::ZERO), |(n, km), t| (n + 1, km + t.distance));
            (count > 0).then_some(TripStatusReportDto {
                status,
                count,
                total_distance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, TruckStatus};
    use crate::reports::fixtures::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_groups_only_present_statuses() {
        let c = customer("A");
        let t = truck("30A-1", TruckStatus::Available, None);
        let d = driver("Tú", DriverStatus::Available, at(2030, 1, 1));
        let trips = vec![
            trip(&c, &t, &d, at(2024, 1, 1), TripStatus::Completed, 120),
            trip(&c, &t, &d, at(2024, 1, 2), TripStatus::Completed, 80),
            trip(&c, &t, &d, at(2024, 1, 3), TripStatus::Cancelled, 15),
        ];
        let snapshot = ReportSnapshot::new(vec![c], vec![t], vec![d], trips, vec![], vec![]);

        let rows = build(&snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, TripStatus::Completed);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_distance, dec!(200));
        assert_eq!(rows[1].status, TripStatus::Cancelled);
    }

    #[test]
    fn test_empty() {
        assert!(build(&ReportSnapshot::default()).is_empty());
    }
}
