//! Modelos de dominio

pub mod truck;

pub use truck::{Truck, TruckStatus};
