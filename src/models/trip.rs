//! Modelo de Trip
//!
//! Un viaje enlaza un cliente, un camión y un conductor. Las fechas reales
//! de inicio y fin se fijan la primera vez que el viaje entra en
//! `InProgress` / `Completed` y nunca se sobrescriben.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "trip_status")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Scheduled,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "Scheduled",
            TripStatus::InProgress => "InProgress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Estado de viaje inválido: '{}'", s))
    }
}

/// Viaje - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub trip_number: String,
    pub customer_id: Uuid,
    pub truck_id: Uuid,
    pub driver_id: Uuid,
    pub dispatcher_id: Option<Uuid>,
    pub origin: String,
    pub destination: String,
    pub scheduled_date: DateTime<Utc>,
    pub actual_start_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub distance: Decimal,
    pub fuel_cost: Option<Decimal>,
    pub other_costs: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Aplicar una transición de estado
    pub fn transition_to(&mut self, status: TripStatus, now: DateTime<Utc>) {
        self.status = status;
        match status {
            TripStatus::InProgress if self.actual_start_date.is_none() => {
                self.actual_start_date = Some(now);
            }
            TripStatus::Completed if self.actual_end_date.is_none() => {
                self.actual_end_date = Some(now);
            }
            _ => {}
        }
        self.updated_at = Some(now);
    }
}
