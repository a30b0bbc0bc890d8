//! Servicio de autenticación
//!
//! Login con contraseña bcrypt y rotación de tokens de refresco guardados
//! en la tabla users.

use bcrypt::verify;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RefreshTokenRequest};
use crate::models::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_refresh_token, generate_token, verify_token_allow_expired, JwtConfig};

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: &LoginRequest, now: DateTime<Utc>) -> Result<AuthResponse, AppError> {
        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(invalid_credentials)?;

        if !user.is_active {
            warn!("🔒 Login rechazado para usuario inactivo {}", user.email);
            return Err(invalid_credentials());
        }

        if !verify(&request.password, &user.password_hash)? {
            warn!("🔒 Contraseña incorrecta para {}", user.email);
            return Err(invalid_credentials());
        }

        let response = self.issue_tokens(&user, now).await?;
        info!("✅ Login correcto: {} ({})", user.email, user.role);
        Ok(response)
    }

    /// El token de acceso puede estar expirado pero debe tener firma válida;
    /// el de refresco debe coincidir con el guardado y no haber expirado.
    pub async fn refresh(&self, request: &RefreshTokenRequest, now: DateTime<Utc>) -> Result<AuthResponse, AppError> {
        let claims = verify_token_allow_expired(&request.token, &self.jwt)
            .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("Token de refresco inválido".to_string()))?;

        let stored_matches = user.refresh_token.as_deref() == Some(request.refresh_token.as_str());
        let still_valid = user.refresh_token_expiry_time.map_or(false, |expiry| expiry > now);

        if !stored_matches || !still_valid {
            warn!("🔒 Token de refresco rechazado para {}", user.email);
            return Err(AppError::Unauthorized("Token de refresco inválido o expirado".to_string()));
        }

        self.issue_tokens(&user, now).await
    }

    async fn issue_tokens(&self, user: &User, now: DateTime<Utc>) -> Result<AuthResponse, AppError> {
        let access = generate_token(user.id, &user.email, user.role, &self.jwt, now)?;
        let refresh_token = generate_refresh_token();
        let refresh_expiry = now + Duration::days(self.jwt.refresh_token_days);

        self.users
            .store_refresh_token(user.id, &refresh_token, refresh_expiry, now)
            .await?;

        Ok(AuthResponse {
            token: access.token,
            refresh_token,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            expires_at: access.expires_at,
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Email o contraseña incorrectos".to_string())
}
