//! Utilidades de validación
//!
//! Validadores personalizados para `validator` y conversión de los
//! parámetros de fecha que llegan por query string.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

/// Convertir un estado o método recibido como texto; inválido es un 400
pub fn parse_enum<T>(value: &str) -> AppResult<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(AppError::BadRequest)
}

/// Validar que un importe o distancia no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Convertir un parámetro de fecha de informe
///
/// Acepta RFC 3339 o `YYYY-MM-DD`. Una fecha sin hora se interpreta como el
/// inicio del día, o como el último instante del día si `end_of_day` es true.
pub fn parse_report_date(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD or RFC3339".to_string());
        error
    })?;

    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        Some(NaiveTime::MIN)
    }
    .ok_or_else(|| ValidationError::new("date"))?;

    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amounts() {
        assert!(validate_non_negative(&dec!(0)).is_ok());
        assert!(validate_non_negative(&dec!(12.5)).is_ok());
        assert!(validate_non_negative(&dec!(-0.01)).is_err());

        assert!(validate_positive(&dec!(1)).is_ok());
        assert!(validate_positive(&dec!(0)).is_err());
        assert!(validate_positive(&dec!(-3)).is_err());
    }

    #[test]
    fn test_parse_enum() {
        use crate::models::{PaymentMethod, TripStatus};

        assert_eq!(parse_enum::<TripStatus>("inprogress").unwrap(), TripStatus::InProgress);
        assert_eq!(parse_enum::<PaymentMethod>("BankTransfer").unwrap(), PaymentMethod::BankTransfer);
        assert!(matches!(parse_enum::<TripStatus>("Lost"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Hà Nội").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_parse_report_date_date_only() {
        let from = parse_report_date("2024-01-01", false).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let to = parse_report_date("2024-03-31", true).unwrap();
        assert_eq!(to.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert!(to > Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_report_date_rfc3339() {
        let dt = parse_report_date("2024-02-10T08:30:00+07:00", true).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 2, 10, 1, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_report_date_invalid() {
        assert!(parse_report_date("10/02/2024", false).is_err());
        assert!(parse_report_date("", false).is_err());
    }
}
