use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Request para crear o reemplazar un cliente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(max = 50))]
    pub tax_code: Option<String>,
    pub notes: Option<String>,
}
