use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Petición para crear un camión
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub model: String,
    pub status: Option<String>,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

// Petición para actualizar un camión. Los campos ausentes conservan su valor;
// un `id` en el cuerpo se ignora.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTruckRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub model: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

// Parámetros de consulta para listar camiones
#[derive(Debug, Default, Deserialize)]
pub struct TruckListQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}
