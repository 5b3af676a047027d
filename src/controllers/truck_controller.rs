use std::sync::Arc;

use validator::Validate;

use crate::dto::truck_dto::{CreateTruckRequest, TruckListQuery, UpdateTruckRequest};
use crate::models::truck::{Truck, TruckStatus};
use crate::repositories::{TruckFilters, TruckRepository};
use crate::utils::errors::{not_found_error, AppResult};

pub struct TruckController {
    repository: Arc<dyn TruckRepository>,
}

impl TruckController {
    pub fn new(repository: Arc<dyn TruckRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateTruckRequest) -> AppResult<Truck> {
        request.validate()?;

        let status = match request.status.as_deref() {
            Some(raw) => raw.parse::<TruckStatus>()?,
            None => TruckStatus::default(),
        };
        let truck = Truck::new(request.model, status, request.details.unwrap_or_default());

        let created = self.repository.insert(truck).await?;
        tracing::info!("🚚 Truck {:?} created ({}, {})", created.id(), created.model(), created.status());
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Truck> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", &id.to_string()))
    }

    pub async fn list(&self, query: TruckListQuery) -> AppResult<Vec<Truck>> {
        let filters = TruckFilters {
            status: query.status.as_deref().map(str::parse::<TruckStatus>).transpose()?,
            model_contains: query.q.filter(|q| !q.trim().is_empty()),
        };

        self.repository.find_all(&filters).await
    }

    pub async fn update(&self, id: i64, request: UpdateTruckRequest) -> AppResult<Truck> {
        request.validate()?;

        let mut truck = self.get_by_id(id).await?;
        if let Some(status) = request.status.as_deref() {
            truck.set_status_str(status)?;
        }
        if let Some(model) = request.model {
            truck.set_model(model);
        }
        if let Some(details) = request.details {
            truck.set_details(details);
        }

        let updated = self
            .repository
            .update(&truck)
            .await?
            .ok_or_else(|| not_found_error("Truck", &id.to_string()))?;

        tracing::info!("✏️ Truck {} updated (status {})", id, updated.status());
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Truck", &id.to_string()));
        }
        tracing::info!("🗑️ Truck {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryTruckRepository;
    use crate::utils::errors::AppError;

    fn controller() -> TruckController {
        TruckController::new(Arc::new(InMemoryTruckRepository::new()))
    }

    fn create_request(model: &str, status: Option<&str>) -> CreateTruckRequest {
        CreateTruckRequest {
            model: model.to_string(),
            status: status.map(str::to_string),
            details: Some("new".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_status_to_active() {
        let truck = controller().create(create_request("Actros", None)).await.unwrap();

        assert_eq!(truck.id(), Some(1));
        assert_eq!(truck.status(), TruckStatus::Active);
        assert_eq!(truck.details(), "new");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_status() {
        let result = controller().create(create_request("Actros", Some("SCRAPPED"))).await;
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_model() {
        let result = controller().create(create_request("   ", None)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_with_invalid_status_changes_nothing() {
        let controller = controller();
        controller.create(create_request("Actros", Some("IN_MAINTENANCE"))).await.unwrap();

        let result = controller
            .update(
                1,
                UpdateTruckRequest {
                    model: Some("Arocs".to_string()),
                    status: Some("BROKEN".to_string()),
                    details: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
        let stored = controller.get_by_id(1).await.unwrap();
        assert_eq!(stored.model(), "Actros");
        assert_eq!(stored.status(), TruckStatus::InMaintenance);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let controller = controller();
        controller.create(create_request("Actros", None)).await.unwrap();

        let updated = controller
            .update(
                1,
                UpdateTruckRequest {
                    model: None,
                    status: Some("retired".to_string()),
                    details: Some("sold".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.model(), "Actros");
        assert_eq!(updated.status(), TruckStatus::Retired);
        assert_eq!(updated.details(), "sold");
    }

    #[tokio::test]
    async fn test_missing_truck_is_not_found() {
        let controller = controller();

        assert!(matches!(controller.get_by_id(5).await, Err(AppError::NotFound(_))));
        assert!(matches!(controller.delete(5).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_with_invalid_status_filter() {
        let query = TruckListQuery {
            status: Some("PARKED".to_string()),
            q: None,
        };
        assert!(matches!(controller().list(query).await, Err(AppError::InvalidStatus(_))));
    }
}
