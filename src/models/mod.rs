//! Modelos del dominio
//!
//! Cada struct mapea exactamente a una tabla del esquema PostgreSQL.

pub mod customer;
pub mod driver;
pub mod invoice;
pub mod payment;
pub mod trip;
pub mod truck;
pub mod user;

pub use customer::Customer;
pub use driver::{Driver, DriverStatus};
pub use invoice::{Invoice, InvoiceStatus};
pub use payment::{Payment, PaymentMethod};
pub use trip::{Trip, TripStatus};
pub use truck::{Truck, TruckStatus};
pub use user::{User, UserRole};
