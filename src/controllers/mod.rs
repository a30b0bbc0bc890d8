pub mod customer_controller;
pub mod driver_controller;
pub mod invoice_controller;
pub mod payment_controller;
pub mod trip_controller;
pub mod truck_controller;
