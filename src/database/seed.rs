//! Usuarios por defecto cuando la tabla users está vacía

use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::models::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub const DEFAULT_USERS: [(&str, &str, &str, UserRole); 3] = [
    ("admin@example.com", "Admin@123", "Administrador", UserRole::Admin),
    ("dispatcher@example.com", "Dispatcher@123", "Despachador", UserRole::Dispatcher),
    ("accountant@example.com", "Accountant@123", "Contable", UserRole::Accountant),
];

/// Devuelve cuántos usuarios se crearon
pub async fn seed_default_users(pool: &PgPool) -> Result<usize, AppError> {
    let users = UserRepository::new(pool.clone());

    if users.count().await? > 0 {
        return Ok(0);
    }

    let now = Utc::now();
    for (email, password, full_name, role) in DEFAULT_USERS {
        let password_hash = hash(password, DEFAULT_COST)?;
        users.create(email, &password_hash, full_name, role, now).await?;
        info!("👤 Usuario por defecto creado: {} ({})", email, role);
    }

    Ok(DEFAULT_USERS.len())
}
