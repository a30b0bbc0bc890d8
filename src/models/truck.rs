//! Modelo de Truck
//!
//! Mapea la tabla `trucks` y el ENUM `truck_status`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del camión - mapea al ENUM truck_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[sqlx(type_name = "truck_status")]
pub enum TruckStatus {
    Available,
    InUse,
    Maintenance,
    Inactive,
}

impl TruckStatus {
    pub const ALL: [TruckStatus; 4] = [
        TruckStatus::Available,
        TruckStatus::InUse,
        TruckStatus::Maintenance,
        TruckStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Available => "Available",
            TruckStatus::InUse => "InUse",
            TruckStatus::Maintenance => "Maintenance",
            TruckStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TruckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Estado de camión inválido: '{}'", s))
    }
}

/// Camión - mapea exactamente a la tabla trucks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: Uuid,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub capacity: Decimal,
    pub status: TruckStatus,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub maintenance_interval_days: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Truck {
    /// Próximo mantenimiento = último + intervalo, solo si ambos existen
    pub fn scheduled_next_maintenance(
        last: Option<DateTime<Utc>>,
        interval_days: Option<i32>,
    ) -> Option<DateTime<Utc>> {
        match (last, interval_days) {
            (Some(last), Some(days)) => Some(last + Duration::days(days as i64)),
            _ => None,
        }
    }

    /// Mantenimiento vence dentro de 7 días (incluye los ya vencidos)
    pub fn is_maintenance_due(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_date
            .map_or(false, |next| next <= now + Duration::days(7))
    }

    pub fn is_maintenance_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_date.map_or(false, |next| next < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_maintenance_requires_both_fields() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Truck::scheduled_next_maintenance(Some(last), Some(30)),
            Some(Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(Truck::scheduled_next_maintenance(Some(last), None), None);
        assert_eq!(Truck::scheduled_next_maintenance(None, Some(30)), None);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("inuse".parse::<TruckStatus>().unwrap(), TruckStatus::InUse);
        assert!("broken".parse::<TruckStatus>().is_err());
    }
}
