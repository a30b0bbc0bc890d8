//! Módulo de base de datos
//!
//! Maneja la conexión, las migraciones, la carga inicial de usuarios y los
//! datos de ejemplo opcionales.

pub mod connection;
pub mod sample_data;
pub mod seed;

pub use connection::{connect_and_migrate, mask_database_url};
pub use sample_data::seed_sample_data;
pub use seed::seed_default_users;
