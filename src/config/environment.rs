//! Configuración de variables de entorno
//!
//! Lee la configuración del proceso tras cargar `.env`. Los valores
//! obligatorios ausentes o inválidos son un error de arranque.

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::str::FromStr;

/// Longitud mínima del secreto HS256
const MIN_JWT_SECRET_LEN: usize = 32;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_minutes: i64,
    pub refresh_token_days: i64,
    pub cors_origins: Vec<String>,
    pub seed_default_users: bool,
    pub seed_sample_data: bool,
}

impl EnvironmentConfig {
    /// Cargar desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar usando una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = lookup("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            bail!("JWT_SECRET must be at least {} bytes long", MIN_JWT_SECRET_LEN);
        }

        let cors_origins = get("CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "*")
            .collect();

        Ok(Self {
            environment: get("ENVIRONMENT", "development"),
            host: get("HOST", "0.0.0.0"),
            port: parse_var("PORT", &get("PORT", "5000"))?,
            jwt_secret,
            jwt_issuer: get("JWT_ISSUER", "TransportApi"),
            jwt_audience: get("JWT_AUDIENCE", "TransportClient"),
            jwt_expiration_minutes: parse_var("JWT_EXPIRATION_MINUTES", &get("JWT_EXPIRATION_MINUTES", "60"))?,
            refresh_token_days: parse_var("REFRESH_TOKEN_DAYS", &get("REFRESH_TOKEN_DAYS", "7"))?,
            cors_origins,
            seed_default_users: parse_var("SEED_DEFAULT_USERS", &get("SEED_DEFAULT_USERS", "true"))?,
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", &get("SEED_SAMPLE_DATA", "false"))?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{} has an invalid value: '{}'", key, raw))
}
