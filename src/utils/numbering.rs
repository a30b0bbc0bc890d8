//! Números de documento legibles: `PREFIJO-yyyyMMdd-XXXXXXXX`

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const TRIP_PREFIX: &str = "TRP";
pub const INVOICE_PREFIX: &str = "INV";
pub const PAYMENT_PREFIX: &str = "PAY";

/// Prefijo + fecha + 8 caracteres hexadecimales en mayúsculas de un UUID nuevo
pub fn generate_number(prefix: &str, now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase();
    format!("{}-{}-{}", prefix, now.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_number_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let number = generate_number(TRIP_PREFIX, now);

        assert!(number.starts_with("TRP-20240305-"));
        let suffix = &number["TRP-20240305-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_numbers_are_unique() {
        let now = Utc::now();
        assert_ne!(generate_number(INVOICE_PREFIX, now), generate_number(INVOICE_PREFIX, now));
    }
}
