//! Almacenamiento de camiones

pub mod memory_truck_repository;
pub mod truck_repository;

pub use memory_truck_repository::InMemoryTruckRepository;
pub use truck_repository::{PgTruckRepository, TruckFilters, TruckRepository};
