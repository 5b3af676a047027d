use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Petición de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// Respuesta de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
