//! Configuración del proyecto
//!
//! Variables de entorno y configuración de base de datos.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;
