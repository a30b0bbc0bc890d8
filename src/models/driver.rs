//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del conductor - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "driver_status")]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
    Inactive,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 4] = [
        DriverStatus::Available,
        DriverStatus::OnTrip,
        DriverStatus::OffDuty,
        DriverStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "Available",
            DriverStatus::OnTrip => "OnTrip",
            DriverStatus::OffDuty => "OffDuty",
            DriverStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Estado de conductor inválido: '{}'", s))
    }
}

/// Conductor - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_number: String,
    pub license_expiry_date: DateTime<Utc>,
    pub address: Option<String>,
    pub status: DriverStatus,
    pub assigned_truck_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
