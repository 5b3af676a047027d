use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::truck::Truck;
use crate::repositories::truck_repository::{ensure_transient, require_id, TruckFilters, TruckRepository};
use crate::utils::errors::AppResult;

#[derive(Default)]
struct Store {
    trucks: BTreeMap<i64, Truck>,
    last_id: i64,
}

/// Almacenamiento en memoria, sin base de datos configurada y en tests
#[derive(Default)]
pub struct InMemoryTruckRepository {
    store: RwLock<Store>,
}

impl InMemoryTruckRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TruckRepository for InMemoryTruckRepository {
    async fn insert(&self, mut truck: Truck) -> AppResult<Truck> {
        ensure_transient(&truck)?;

        let mut store = self.store.write().await;
        let id = store.last_id + 1;
        truck.assign_id(id)?;
        store.last_id = id;
        store.trucks.insert(id, truck.clone());

        Ok(truck)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Truck>> {
        Ok(self.store.read().await.trucks.get(&id).cloned())
    }

    async fn find_all(&self, filters: &TruckFilters) -> AppResult<Vec<Truck>> {
        let store = self.store.read().await;
        let mut trucks: Vec<Truck> = store
            .trucks
            .values()
            .filter(|truck| filters.matches(truck))
            .cloned()
            .collect();

        trucks.sort_by_cached_key(|truck| (truck.model().to_lowercase(), truck.id()));
        Ok(trucks)
    }

    async fn update(&self, truck: &Truck) -> AppResult<Option<Truck>> {
        let id = require_id(truck)?;

        let mut store = self.store.write().await;
        Ok(store.trucks.get_mut(&id).map(|stored| {
            *stored = truck.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.write().await.trucks.remove(&id).is_some())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::truck::TruckStatus;
    use crate::utils::errors::AppError;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryTruckRepository::new();

        let first = repo.insert(Truck::new("Actros", TruckStatus::Active, "new")).await.unwrap();
        let second = repo.insert(Truck::default()).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
        assert_eq!(first.model(), "Actros");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTruckRepository::new();
        let first = repo.insert(Truck::default()).await.unwrap();

        assert!(repo.delete(first.id().unwrap()).await.unwrap());
        let second = repo.insert(Truck::default()).await.unwrap();

        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn test_insert_persisted_truck_is_conflict() {
        let repo = InMemoryTruckRepository::new();
        let result = repo.insert(Truck::with_id(9, "Arocs", TruckStatus::Active, "")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_find_all_sorts_by_model_then_id() {
        let repo = InMemoryTruckRepository::new();
        for model in ["volvo FH", "Actros", "arocs", "Actros"] {
            repo.insert(Truck::new(model, TruckStatus::Active, "")).await.unwrap();
        }

        let listed = repo.find_all(&TruckFilters::default()).await.unwrap();
        let order: Vec<(Option<i64>, &str)> = listed.iter().map(|t| (t.id(), t.model())).collect();

        assert_eq!(
            order,
            vec![
                (Some(2), "Actros"),
                (Some(4), "Actros"),
                (Some(3), "arocs"),
                (Some(1), "volvo FH"),
            ]
        );
    }

    #[tokio::test]
    async fn test_find_all_applies_filters() {
        let repo = InMemoryTruckRepository::new();
        repo.insert(Truck::new("Actros", TruckStatus::Active, "")).await.unwrap();
        repo.insert(Truck::new("Actros L", TruckStatus::Retired, "")).await.unwrap();
        repo.insert(Truck::new("Atego", TruckStatus::Retired, "")).await.unwrap();

        let filters = TruckFilters {
            status: Some(TruckStatus::Retired),
            model_contains: Some("actros".to_string()),
        };
        let listed = repo.find_all(&filters).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].model(), "Actros L");
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryTruckRepository::new();
        let mut truck = repo.insert(Truck::new("Actros", TruckStatus::Active, "")).await.unwrap();

        truck.set_status(TruckStatus::InMaintenance);
        truck.set_details("gearbox");
        let updated = repo.update(&truck).await.unwrap().unwrap();

        assert_eq!(updated, truck);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(truck));
    }

    #[tokio::test]
    async fn test_update_missing_or_transient() {
        let repo = InMemoryTruckRepository::new();

        let missing = Truck::with_id(42, "Actros", TruckStatus::Active, "");
        assert_eq!(repo.update(&missing).await.unwrap(), None);

        let transient = Truck::default();
        assert!(matches!(repo.update(&transient).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryTruckRepository::new();
        assert!(!repo.delete(1).await.unwrap());
    }
}
