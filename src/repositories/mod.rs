pub mod customer_repository;
pub mod driver_repository;
pub mod invoice_repository;
pub mod payment_repository;
pub mod report_repository;
pub mod trip_repository;
pub mod truck_repository;
pub mod user_repository;
