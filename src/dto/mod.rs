pub mod auth_dto;
pub mod customer_dto;
pub mod driver_dto;
pub mod invoice_dto;
pub mod payment_dto;
pub mod report_dto;
pub mod report_query;
pub mod trip_dto;
pub mod truck_dto;
