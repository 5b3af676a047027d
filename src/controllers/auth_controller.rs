use std::sync::Arc;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::services::AuthService;
use crate::utils::errors::AppResult;

pub struct AuthController {
    service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(service: Arc<AuthService>) -> Self {
        Self { service }
    }

    pub fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let username = request.username.trim();
        let issued = self.service.login(username, &request.password)?;

        Ok(LoginResponse {
            token: issued.token,
            token_type: "Bearer".to_string(),
            username: username.to_string(),
            expires_at: issued.expires_at,
        })
    }
}
