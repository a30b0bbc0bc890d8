//! Motor de informes
//!
//! Funciones puras sobre una `ReportSnapshot` y el instante actual. Ningún
//! informe falla: una instantánea vacía produce ceros y listas vacías.

pub mod clock;
pub mod customer;
pub mod dashboard;
pub mod debt;
pub mod driver;
pub mod period;
pub mod revenue;
pub mod revenue_detail;
pub mod snapshot;
pub mod source;
pub mod trip_detail;
pub mod trip_status;
pub mod truck;
pub mod utilization;

pub use clock::{Clock, FixedClock, SystemClock};
pub use period::{build_periods, PeriodBucket, PeriodType};
pub use snapshot::ReportSnapshot;
pub use source::{InMemoryReportSource, ReportDataSource};

use rust_decimal::Decimal;

/// `part / whole × 100` con dos decimales; 0 si `whole` es 0
pub(crate) fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Crecimiento porcentual respecto a `previous`; 0 si no hubo base positiva
pub(crate) fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent(current - previous, previous)
}

pub(crate) fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Constructores de entidades para las pruebas del motor

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::{
        Customer, Driver, DriverStatus, Invoice, InvoiceStatus, Payment, PaymentMethod, Trip,
        TripStatus, Truck, TruckStatus,
    };

    pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    pub fn customer(name: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            company_name: None,
            phone: "0901234567".to_string(),
            email: None,
            address: "1 Trần Hưng Đạo".to_string(),
            tax_code: None,
            notes: None,
            created_at: at(2023, 1, 1),
            updated_at: None,
        }
    }

    pub fn truck(plate: &str, status: TruckStatus, next_maintenance: Option<DateTime<Utc>>) -> Truck {
        Truck {
            id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            brand: "Hino".to_string(),
            model: "500".to_string(),
            year: 2020,
            capacity: Decimal::from(8),
            status,
            last_maintenance_date: None,
            next_maintenance_date: next_maintenance,
            maintenance_interval_days: None,
            notes: None,
            created_at: at(2024, 1, 1),
            updated_at: None,
        }
    }

    pub fn driver(name: &str, status: DriverStatus, license_expiry: DateTime<Utc>) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            phone: "0907654321".to_string(),
            email: None,
            license_number: format!("LIC-{}", name),
            license_expiry_date: license_expiry,
            address: None,
            status,
            assigned_truck_id: None,
            notes: None,
            created_at: at(2023, 1, 1),
            updated_at: None,
        }
    }

    pub fn trip(
        customer: &Customer,
        truck: &Truck,
        driver: &Driver,
        scheduled: DateTime<Utc>,
        status: TripStatus,
        distance: i64,
    ) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            trip_number: format!("TRP-{}", Uuid::new_v4().simple()),
            customer_id: customer.id,
            truck_id: truck.id,
            driver_id: driver.id,
            dispatcher_id: None,
            origin: "Hà Nội".to_string(),
            destination: "Đà Nẵng".to_string(),
            scheduled_date: scheduled,
            actual_start_date: None,
            actual_end_date: None,
            status,
            distance: Decimal::from(distance),
            fuel_cost: None,
            other_costs: None,
            notes: None,
            created_at: scheduled - Duration::days(1),
            updated_at: None,
        }
    }

    pub fn invoice(
        customer: &Customer,
        trip: Option<&Trip>,
        issue: DateTime<Utc>,
        due: DateTime<Utc>,
        total: Decimal,
        status: InvoiceStatus,
    ) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_number: format!("INV-{}", Uuid::new_v4().simple()),
            customer_id: customer.id,
            trip_id: trip.map(|t| t.id),
            issue_date: issue,
            due_date: due,
            amount: total,
            tax_amount: None,
            total_amount: total,
            status,
            description: None,
            notes: None,
            created_at: issue,
            updated_at: None,
        }
    }

    pub fn payment(invoice: &Invoice, amount: Decimal, date: DateTime<Utc>) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            payment_number: format!("PAY-{}", Uuid::new_v4().simple()),
            invoice_id: invoice.id,
            payment_date: date,
            amount,
            payment_method: PaymentMethod::BankTransfer,
            reference_number: None,
            notes: None,
            created_at: date,
            updated_at: None,
        }
    }
}
