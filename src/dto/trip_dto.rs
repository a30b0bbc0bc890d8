use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::TripStatus;
use crate::utils::validation::{validate_non_negative, validate_not_blank};

/// Request para crear o reemplazar un viaje
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub customer_id: Uuid,
    pub truck_id: Uuid,
    pub driver_id: Uuid,
    #[validate(length(min = 1), custom = "validate_not_blank")]
    pub origin: String,
    #[validate(length(min = 1), custom = "validate_not_blank")]
    pub destination: String,
    pub scheduled_date: DateTime<Utc>,
    #[validate(custom = "validate_non_negative")]
    pub distance: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub fuel_cost: Option<Decimal>,
    #[validate(custom = "validate_non_negative")]
    pub other_costs: Option<Decimal>,
    pub notes: Option<String>,
}

/// Request de cambio de estado (`PATCH /trips/:id/status`)
#[derive(Debug, Deserialize)]
pub struct TripStatusRequest {
    pub status: String,
}

/// Viaje con los nombres de sus relaciones resueltos
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub id: Uuid,
    pub trip_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub truck_id: Uuid,
    pub truck_license_plate: String,
    pub driver_id: Uuid,
    pub driver_name: String,
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
