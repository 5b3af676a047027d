//! Configuración de variables de entorno
//!
//! Lee la configuración del servidor, la autenticación y el almacenamiento
//! desde variables de entorno (opcionalmente cargadas de `.env` por `main`).

use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "fms-development-secret-change-me";
const DEFAULT_USERS: &str = "admin:admin123,user:user123";
const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;

/// Errores de configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must be set in production")]
    Missing(&'static str),
}

/// Un login que el servicio acepta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub users: Vec<UserCredential>,
    pub bcrypt_cost: u32,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            users: parse_users(DEFAULT_USERS).unwrap_or_default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde el entorno, con valores por defecto para las claves ausentes
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => return Err(ConfigError::Missing("JWT_SECRET")),
            _ => defaults.jwt_secret,
        };

        let users = match env::var("FMS_USERS") {
            Ok(raw) => parse_users(&raw)?,
            Err(_) => defaults.users,
        };

        Ok(Self {
            environment,
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret,
            jwt_expiration: check_jwt_expiration(parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.cors_origins),
            users,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Host y puerto tal como los acepta `TcpListener::bind`: resuelve nombres
    /// de host y literales IPv6 además de direcciones IPv4
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// La vida del token va de un segundo a un año
fn check_jwt_expiration(seconds: u64) -> Result<u64, ConfigError> {
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION {
        return Err(ConfigError::Invalid {
            key: "JWT_EXPIRATION",
            value: seconds.to_string(),
        });
    }
    Ok(seconds)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parsear pares `nombre:contraseña` separados por comas
pub fn parse_users(raw: &str) -> Result<Vec<UserCredential>, ConfigError> {
    split_list(raw)
        .into_iter()
        .map(|entry| match entry.split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                Ok(UserCredential {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            _ => Err(ConfigError::Invalid {
                key: "FMS_USERS",
                value: entry,
            }),
        })
        .collect()
}
