//! Particionado de un rango de fechas en periodos contiguos
//!
//! `build_periods` es una función total: un rango invertido produce una lista
//! vacía y un tipo de periodo desconocido se trata como mensual.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodType {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl PeriodType {
    /// Interpretación tolerante del parámetro `periodType`
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("day") => PeriodType::Day,
            Some("week") => PeriodType::Week,
            Some("quarter") => PeriodType::Quarter,
            _ => PeriodType::Month,
        }
    }
}

/// Un periodo `[start, end)` con su etiqueta de presentación
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodBucket {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Recorre el rango desde `from` hasta sobrepasar `to`
pub fn build_periods(from: DateTime<Utc>, to: DateTime<Utc>, period: PeriodType) -> Vec<PeriodBucket> {
    let mut buckets = Vec::new();
    let mut current = from;

    while current <= to {
        let (end, label) = match period {
            PeriodType::Day => (current + Duration::days(1), current.format("%Y-%m-%d").to_string()),
            PeriodType::Week => (
                current + Duration::days(7),
                format!("Week {}", current.iso_week().week()),
            ),
            PeriodType::Quarter => {
                let quarter = quarter_of(current);
                (
                    next_quarter_start(current),
                    format!("{}-Q{}", current.year(), quarter),
                )
            }
            PeriodType::Month => (
                add_months(current, 1),
                current.format("%Y-%m").to_string(),
            ),
        };

        // Un paso que no avanza solo puede venir de un desbordamiento de fechas
        if end <= current {
            break;
        }

        buckets.push(PeriodBucket {
            label,
            start: current,
            end,
        });
        current = end;
    }

    buckets
}

pub fn quarter_of(instant: DateTime<Utc>) -> u32 {
    (instant.month() - 1) / 3 + 1
}

/// Medianoche UTC del primer día del trimestre siguiente
fn next_quarter_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    let quarter = quarter_of(instant);
    let (year, month) = if quarter == 4 {
        (instant.year() + 1, 1)
    } else {
        (instant.year(), quarter * 3 + 1)
    };
    month_start(year, month).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Suma meses conservando la hora; el día se ajusta al último del mes si no existe
pub fn add_months(instant: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    instant
        .checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn sub_months(instant: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    instant
        .checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Medianoche UTC del día 1 del mes indicado
pub fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| Utc.from_utc_datetime(&d.and_time(chrono::NaiveTime::MIN)))
}

/// Medianoche UTC del día de `instant`
pub fn day_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&instant.date_naive().and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_quarter_range_is_single_bucket() {
        let end = at(2024, 3, 31) + Duration::hours(23) + Duration::minutes(59);
        let buckets = build_periods(at(2024, 1, 1), end, PeriodType::Quarter);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "2024-Q1");
        assert_eq!(buckets[0].end, at(2024, 4, 1));
    }

    #[test]
    fn test_quarter_starting_mid_quarter_snaps_to_next() {
        let buckets = build_periods(at(2024, 2, 15), at(2024, 7, 1), PeriodType::Quarter);
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(labels, vec!["2024-Q1", "2024-Q2", "2024-Q3"]);
        assert_eq!(buckets[1].start, at(2024, 4, 1));
        assert_eq!(buckets[2].start, at(2024, 7, 1));
    }

    #[test]
    fn test_q4_rolls_into_next_year() {
        let buckets = build_periods(at(2023, 11, 1), at(2024, 1, 5), PeriodType::Quarter);
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-Q4", "2024-Q1"]);
    }

    #[test]
    fn test_month_and_day_labels() {
        let months = build_periods(at(2024, 1, 1), at(2024, 3, 31), PeriodType::Month);
        let labels: Vec<_> = months.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);

        let days = build_periods(at(2024, 2, 28), at(2024, 3, 1), PeriodType::Day);
        let labels: Vec<_> = days.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_week_labels_use_iso_week() {
        let weeks = build_periods(at(2024, 1, 1), at(2024, 1, 14), PeriodType::Week);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].label, "Week 1");
        assert_eq!(weeks[1].label, "Week 2");
    }

    #[test]
    fn test_buckets_are_contiguous() {
        for period in [PeriodType::Day, PeriodType::Week, PeriodType::Month, PeriodType::Quarter] {
            let buckets = build_periods(at(2023, 12, 20), at(2024, 6, 10), period);
            assert_eq!(buckets[0].start, at(2023, 12, 20));
            for pair in buckets.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let last = buckets.last().unwrap();
            assert!(last.start <= at(2024, 6, 10) && last.end > at(2024, 6, 10));
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(build_periods(at(2024, 5, 1), at(2024, 4, 1), PeriodType::Day).is_empty());
    }

    #[test]
    fn test_unknown_period_defaults_to_month() {
        assert_eq!(PeriodType::parse_lenient(Some("fortnight")), PeriodType::Month);
        assert_eq!(PeriodType::parse_lenient(None), PeriodType::Month);
        assert_eq!(PeriodType::parse_lenient(Some("Quarter")), PeriodType::Quarter);
    }
}
