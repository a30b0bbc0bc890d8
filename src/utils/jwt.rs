//! Utilidades JWT
//!
//! Tokens de acceso HS256 con `sub`, `email`, `role`, `iss`, `aud`, `iat`, `exp`
//! y tokens de refresco opacos (64 bytes aleatorios en base64).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, models::UserRole, utils::errors::AppError};

/// Claims del token de acceso
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
    pub refresh_token_days: i64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            expiration_minutes: config.jwt_expiration_minutes,
            refresh_token_days: config.refresh_token_days,
        }
    }
}

/// Token firmado junto con su instante de expiración
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Generar token de acceso para un usuario
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<IssuedToken, AppError> {
    let expires_at = now + Duration::minutes(config.expiration_minutes);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
    let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))?;

    Ok(IssuedToken { token, expires_at })
}

fn validation(config: &JwtConfig, validate_exp: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);
    validation.validate_exp = validate_exp;
    validation.leeway = 0;
    validation
}

/// Verificar y decodificar token de acceso
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    decode::<JwtClaims>(token, &decoding_key, &validation(config, true))
        .map(|data| data.claims)
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))
}

/// Decodificar un token posiblemente expirado (firma, emisor y audiencia se siguen validando)
pub fn verify_token_allow_expired(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    decode::<JwtClaims>(token, &decoding_key, &validation(config, false))
        .map(|data| data.claims)
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))
}

/// Generar token de refresco opaco
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}
