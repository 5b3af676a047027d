//! Servicio de autenticación
//!
//! Guarda los hashes bcrypt de los usuarios configurados y emite JWTs
//! para los logins correctos.

use std::collections::HashMap;

use crate::config::environment::{EnvironmentConfig, UserCredential};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{self, IssuedToken, JwtClaims, JwtConfig};

pub struct AuthService {
    password_hashes: HashMap<String, String>,
    jwt_config: JwtConfig,
}

impl AuthService {
    /// Hashear de entrada todas las contraseñas configuradas
    pub fn new(users: &[UserCredential], bcrypt_cost: u32, jwt_config: JwtConfig) -> AppResult<Self> {
        let mut password_hashes = HashMap::with_capacity(users.len());
        for user in users {
            let hash = bcrypt::hash(&user.password, bcrypt_cost)
                .map_err(|e| AppError::Hash(format!("Error hashing password for {}: {}", user.username, e)))?;
            password_hashes.insert(user.username.clone(), hash);
        }

        tracing::info!("🔐 Auth service ready with {} user(s)", password_hashes.len());
        Ok(Self {
            password_hashes,
            jwt_config,
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::new(&config.users, config.bcrypt_cost, JwtConfig::from(config))
    }

    /// Verificar credenciales y emitir un token
    pub fn login(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::BadRequest("Both fields are required.".to_string()));
        }

        let Some(hash) = self.password_hashes.get(username) else {
            tracing::warn!("Login attempt for unknown user '{}'", username);
            return Err(invalid_credentials());
        };

        let valid = bcrypt::verify(password, hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !valid {
            tracing::warn!("Wrong password for user '{}'", username);
            return Err(invalid_credentials());
        }

        tracing::info!("✅ User '{}' logged in", username);
        jwt::generate_token(username, &self.jwt_config)
    }

    /// Validar un token bearer y comprobar que su usuario sigue existiendo
    pub fn validate_token(&self, token: &str) -> AppResult<JwtClaims> {
        let claims = jwt::verify_token(token, &self.jwt_config)?;
        if !self.password_hashes.contains_key(&claims.sub) {
            return Err(AppError::Unauthorized("Unknown user".to_string()));
        }
        Ok(claims)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::parse_users;

    fn service() -> AuthService {
        let users = parse_users("admin:admin123,user:user123").unwrap();
        let jwt_config = JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 60,
        };
        AuthService::new(&users, 4, jwt_config).unwrap()
    }

    #[test]
    fn test_login_issues_valid_token() {
        let service = service();
        let issued = service.login("admin", "admin123").unwrap();

        let claims = service.validate_token(&issued.token).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let service = service();

        assert!(matches!(service.login("admin", "nope"), Err(AppError::Unauthorized(_))));
        assert!(matches!(service.login("ghost", "admin123"), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let service = service();

        assert!(matches!(service.login("", "admin123"), Err(AppError::BadRequest(_))));
        assert!(matches!(service.login("admin", ""), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_token_for_removed_user_is_rejected() {
        let issued = service().login("user", "user123").unwrap();

        let users = parse_users("admin:admin123").unwrap();
        let jwt_config = JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 60,
        };
        let narrowed = AuthService::new(&users, 4, jwt_config).unwrap();

        assert!(matches!(narrowed.validate_token(&issued.token), Err(AppError::Unauthorized(_))));
    }
}
