//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de roles por endpoint.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::UserRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// 403 si el rol del usuario no está entre los permitidos
    pub fn require_roles(&self, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "El rol {} no tiene acceso a este recurso",
                self.role
            )))
        }
    }
}

pub const ANY_ROLE: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Dispatcher,
    UserRole::Accountant,
    UserRole::Driver,
];
pub const OPERATIONS: &[UserRole] = &[UserRole::Admin, UserRole::Dispatcher];
pub const FINANCE: &[UserRole] = &[UserRole::Admin, UserRole::Accountant];
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    debug!("🔑 {} {} -> {} ({})", request.method(), request.uri().path(), claims.email, claims.role);

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
