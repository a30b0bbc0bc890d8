use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_non_negative, validate_not_blank};

/// Request para crear o reemplazar un camión
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TruckRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub license_plate: String,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(custom = "validate_non_negative")]
    pub capacity: Decimal,
    /// Por defecto `Available`
    pub status: Option<String>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 3650))]
    pub maintenance_interval_days: Option<i32>,
    pub notes: Option<String>,
}
