//! Services module
//!
//! Lógica de negocio que combina varios repositorios o el motor de informes.

pub mod auth_service;
pub mod report_service;

pub use auth_service::AuthService;
pub use report_service::ReportService;
