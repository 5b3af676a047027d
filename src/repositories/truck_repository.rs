use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::truck::{Truck, TruckStatus};
use crate::utils::errors::{AppError, AppResult};

/// Filtros para listar camiones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruckFilters {
    pub status: Option<TruckStatus>,
    /// Subcadena del modelo, sin distinguir mayúsculas
    pub model_contains: Option<String>,
}

impl TruckFilters {
    pub fn matches(&self, truck: &Truck) -> bool {
        let status_ok = self.status.map_or(true, |status| truck.status() == status);
        let model_ok = self.model_contains.as_deref().map_or(true, |needle| {
            truck.model().to_lowercase().contains(&needle.to_lowercase())
        });
        status_ok && model_ok
    }
}

/// Almacenamiento de camiones. Las implementaciones asignan el id al insertar.
#[async_trait]
pub trait TruckRepository: Send + Sync {
    /// Guardar un camión nuevo y devolverlo con su id
    async fn insert(&self, truck: Truck) -> AppResult<Truck>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Truck>>;

    /// Camiones que cumplen `filters`, ordenados por modelo (sin mayúsculas) y id
    async fn find_all(&self, filters: &TruckFilters) -> AppResult<Vec<Truck>>;

    /// Sobrescribir un camión guardado. `None` si ningún camión tiene ese id.
    async fn update(&self, truck: &Truck) -> AppResult<Option<Truck>>;

    /// Indica si se borró un camión
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Nombre corto del backend para el health check
    fn backend(&self) -> &'static str;
}

pub(crate) fn ensure_transient(truck: &Truck) -> AppResult<()> {
    match truck.id() {
        Some(id) => Err(AppError::Conflict(format!("Truck {} is already persisted", id))),
        None => Ok(()),
    }
}

pub(crate) fn require_id(truck: &Truck) -> AppResult<i64> {
    truck
        .id()
        .ok_or_else(|| AppError::BadRequest("Cannot update a truck that was never persisted".to_string()))
}

// Fila de la tabla trucks
#[derive(Debug, sqlx::FromRow)]
struct TruckRow {
    id: i64,
    model: String,
    status: String,
    details: String,
}

impl TryFrom<TruckRow> for Truck {
    type Error = AppError;

    fn try_from(row: TruckRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<TruckStatus>().map_err(|e| {
            AppError::Internal(format!("Stored truck {} has {}", row.id, e))
        })?;
        Ok(Truck::with_id(row.id, row.model, status, row.details))
    }
}

/// Almacenamiento de camiones en PostgreSQL
pub struct PgTruckRepository {
    pool: PgPool,
}

impl PgTruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TruckRepository for PgTruckRepository {
    async fn insert(&self, truck: Truck) -> AppResult<Truck> {
        ensure_transient(&truck)?;

        let row = sqlx::query_as::<_, TruckRow>(
            r#"
            INSERT INTO trucks (model, status, details)
            VALUES ($1, $2, $3)
            RETURNING id, model, status, details
            "#,
        )
        .bind(truck.model())
        .bind(truck.status().as_str())
        .bind(truck.details())
        .fetch_one(&self.pool)
        .await?;

        Truck::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Truck>> {
        let row = sqlx::query_as::<_, TruckRow>(
            "SELECT id, model, status, details FROM trucks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Truck::try_from).transpose()
    }

    async fn find_all(&self, filters: &TruckFilters) -> AppResult<Vec<Truck>> {
        let rows = sqlx::query_as::<_, TruckRow>(
            r#"
            SELECT id, model, status, details
            FROM trucks
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR POSITION(LOWER($2) IN LOWER(model)) > 0)
            ORDER BY LOWER(model), id
            "#,
        )
        .bind(filters.status.map(|status| status.as_str()))
        .bind(filters.model_contains.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Truck::try_from).collect()
    }

    async fn update(&self, truck: &Truck) -> AppResult<Option<Truck>> {
        let id = require_id(truck)?;

        let row = sqlx::query_as::<_, TruckRow>(
            r#"
            UPDATE trucks
            SET model = $2, status = $3, details = $4
            WHERE id = $1
            RETURNING id, model, status, details
            "#,
        )
        .bind(id)
        .bind(truck.model())
        .bind(truck.status().as_str())
        .bind(truck.details())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Truck::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = TruckRow {
            id: 4,
            model: "Actros".to_string(),
            status: "RETIRED".to_string(),
            details: "sold".to_string(),
        };

        let truck = Truck::try_from(row).unwrap();

        assert_eq!(truck, Truck::with_id(4, "Actros", TruckStatus::Retired, "sold"));
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let row = TruckRow {
            id: 4,
            model: "Actros".to_string(),
            status: "SCRAPPED".to_string(),
            details: String::new(),
        };

        assert!(matches!(Truck::try_from(row), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_filters_match() {
        let truck = Truck::new("Mercedes Actros", TruckStatus::Active, "");

        assert!(TruckFilters::default().matches(&truck));
        assert!(TruckFilters {
            model_contains: Some("ACTROS".to_string()),
            ..Default::default()
        }
        .matches(&truck));
        assert!(!TruckFilters {
            status: Some(TruckStatus::Retired),
            ..Default::default()
        }
        .matches(&truck));
    }
}
