//! Back-office de transporte por carretera
//!
//! API REST (axum + sqlx/PostgreSQL) para clientes, camiones, conductores,
//! viajes, facturas y pagos, más un motor de informes en memoria.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod reports;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
