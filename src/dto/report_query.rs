//! Parámetros de consulta de los informes con rango de fechas

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::reports::period::{sub_months, PeriodType};
use crate::utils::errors::AppError;
use crate::utils::validation::parse_report_date;

/// `?fromDate=...&toDate=...&periodType=...`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRangeQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub period_type: Option<String>,
}

/// Rango ya resuelto contra el reloj
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportRangeQuery {
    /// Sin `fromDate` se usa hace un mes; sin `toDate`, ahora.
    /// Una fecha sin hora en `toDate` cubre el día completo.
    /// Un rango invertido no es un error: los informes salen vacíos.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ReportRange, AppError> {
        let from = match self.from_date.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => parse_report_date(value, false)
                .map_err(|_| AppError::BadRequest(format!("fromDate inválida: '{}'", value)))?,
            None => sub_months(now, 1),
        };
        let to = match self.to_date.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => parse_report_date(value, true)
                .map_err(|_| AppError::BadRequest(format!("toDate inválida: '{}'", value)))?,
            None => now,
        };

        Ok(ReportRange { from, to })
    }

    pub fn period(&self) -> PeriodType {
        PeriodType::parse_lenient(self.period_type.as_deref())
    }
}
