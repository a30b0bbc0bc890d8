use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Request para crear o reemplazar un conductor
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub full_name: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub license_number: String,
    pub license_expiry_date: DateTime<Utc>,
    pub address: Option<String>,
    /// Por defecto `Available`
    pub status: Option<String>,
    pub assigned_truck_id: Option<Uuid>,
    pub notes: Option<String>,
}
