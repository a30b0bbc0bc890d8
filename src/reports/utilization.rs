//! Utilización de camiones y conductores
//!
//! Días en uso = días naturales distintos (hasta hoy) cubiertos por viajes no
//! cancelados, desde el inicio real (o la fecha programada) hasta el fin real.
//! Un viaje en curso sin fin real cubre hasta hoy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::models::{Trip, TripStatus};

/// Ventana de días naturales `[first, last]`, ambos incluidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DayWindow {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        (last >= first).then_some(Self { first, last })
    }

    pub fn len(&self) -> i64 {
        (self.last - self.first).num_days() + 1
    }
}

fn trip_span(trip: &Trip, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = trip
        .actual_start_date
        .unwrap_or(trip.scheduled_date)
        .date_naive();
    let end = match (trip.actual_end_date, trip.status) {
        (Some(end), _) => end.date_naive(),
        (None, TripStatus::InProgress) => today,
        (None, _) => start,
    };
    (start, end.max(start))
}

/// Cuenta los días distintos de la ventana ocupados por los viajes dados
pub fn days_in_use<'a, I>(trips: I, window: DayWindow, today: NaiveDate) -> i64
where
    I: IntoIterator<Item = &'a Trip>,
{
    let upper = window.last.min(today);
    let mut days = BTreeSet::new();

    for trip in trips {
        if trip.status == TripStatus::Cancelled {
            continue;
        }
        let (start, end) = trip_span(trip, today);
        let start = start.max(window.first);
        let end = end.min(upper);
        days.extend(start.iter_days().take_while(|d| *d <= end));
    }

    days.len() as i64
}

/// Porcentaje de la ventana en uso, limitado a 100
pub fn utilization_rate(days_in_use: i64, window: DayWindow) -> Decimal {
    let rate = super::percent(Decimal::from(days_in_use), Decimal::from(window.len()));
    rate.min(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, TruckStatus};
    use crate::reports::fixtures::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_overlapping_trips_count_days_once() {
        let c = customer("A");
        let t = truck("29C-12345", TruckStatus::Available, None);
        let dr = driver("Minh", DriverStatus::Available, at(2030, 1, 1));

        let mut first = trip(&c, &t, &dr, at(2024, 3, 1), TripStatus::Completed, 100);
        first.actual_start_date = Some(at(2024, 3, 1) + Duration::hours(6));
        first.actual_end_date = Some(at(2024, 3, 3) + Duration::hours(18));
        let second = trip(&c, &t, &dr, at(2024, 3, 3), TripStatus::Scheduled, 50);
        let cancelled = trip(&c, &t, &dr, at(2024, 3, 10), TripStatus::Cancelled, 50);

        let window = DayWindow::new(d(2024, 3, 1), d(2024, 3, 10)).unwrap();
        let used = days_in_use([&first, &second, &cancelled], window, d(2024, 6, 1));

        assert_eq!(used, 3);
        assert_eq!(utilization_rate(used, window), dec!(30));
    }

    #[test]
    fn test_in_progress_trip_runs_until_today() {
        let c = customer("A");
        let t = truck("29C-12345", TruckStatus::InUse, None);
        let dr = driver("Minh", DriverStatus::OnTrip, at(2030, 1, 1));
        let mut running = trip(&c, &t, &dr, at(2024, 3, 1), TripStatus::InProgress, 100);
        running.actual_start_date = Some(at(2024, 3, 2));

        let window = DayWindow::new(d(2024, 3, 1), d(2024, 3, 31)).unwrap();
        assert_eq!(days_in_use([&running], window, d(2024, 3, 5)), 4);
    }

    #[test]
    fn test_future_days_are_not_counted() {
        let c = customer("A");
        let t = truck("29C-12345", TruckStatus::Available, None);
        let dr = driver("Minh", DriverStatus::Available, at(2030, 1, 1));
        let planned = trip(&c, &t, &dr, at(2024, 4, 20), TripStatus::Scheduled, 10);

        let window = DayWindow::new(d(2024, 4, 1), d(2024, 4, 30)).unwrap();
        assert_eq!(days_in_use([&planned], window, d(2024, 4, 10)), 0);
    }

    #[test]
    fn test_inverted_window() {
        assert!(DayWindow::new(d(2024, 4, 2), d(2024, 4, 1)).is_none());
        assert_eq!(DayWindow::new(d(2024, 4, 1), d(2024, 4, 1)).unwrap().len(), 1);
    }
}
