//! Modelo de camión
//!
//! Registro simple de un vehículo de la flota. No lleva mapeo de almacenamiento
//! propio; los repositorios convierten desde y hacia sus filas explícitamente.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{IdAlreadyAssignedError, InvalidStatusError};

/// Estado operativo de un camión
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    #[default]
    Active,
    InMaintenance,
    Retired,
}

impl TruckStatus {
    pub const ALL: [TruckStatus; 3] = [
        TruckStatus::Active,
        TruckStatus::InMaintenance,
        TruckStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Active => "ACTIVE",
            TruckStatus::InMaintenance => "IN_MAINTENANCE",
            TruckStatus::Retired => "RETIRED",
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TruckStatus {
    type Err = InvalidStatusError;

    /// Acepta las grafías canónicas, ignorando espacios alrededor y mayúsculas ASCII.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TruckStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidStatusError::new(s))
    }
}

/// Un vehículo de la flota.
///
/// `id` queda en `None` hasta que un repositorio guarda el registro, y luego
/// no puede cambiar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Truck {
    id: Option<i64>,
    model: String,
    status: TruckStatus,
    details: String,
}

impl Truck {
    pub fn new(model: impl Into<String>, status: TruckStatus, details: impl Into<String>) -> Self {
        Self {
            id: None,
            model: model.into(),
            status,
            details: details.into(),
        }
    }

    /// Reconstruir un registro que ya está guardado.
    pub fn with_id(
        id: i64,
        model: impl Into<String>,
        status: TruckStatus,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(model, status, details)
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Asignar el id de almacenamiento. Reasignar el mismo id no hace nada.
    pub fn assign_id(&mut self, id: i64) -> Result<(), IdAlreadyAssignedError> {
        match self.id {
            Some(current) if current != id => Err(IdAlreadyAssignedError {
                current,
                requested: id,
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn status(&self) -> TruckStatus {
        self.status
    }

    pub fn set_status(&mut self, status: TruckStatus) {
        self.status = status;
    }

    /// Parsear y fijar el estado desde texto. Si falla, se mantiene el actual.
    pub fn set_status_str(&mut self, value: &str) -> Result<(), InvalidStatusError> {
        self.status = value.parse()?;
        Ok(())
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.details = details.into();
    }
}
