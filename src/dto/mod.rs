//! Cuerpos de petición y respuesta de la API HTTP

use serde::Serialize;

pub mod auth_dto;
pub mod truck_dto;

// Envoltorio genérico de respuesta
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
