//! Estado compartido de la aplicación
//!
//! Llega a cada handler de axum a través del router.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::TruckRepository;
use crate::services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub trucks: Arc<dyn TruckRepository>,
    pub auth: Arc<AuthService>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(trucks: Arc<dyn TruckRepository>, auth: AuthService, config: EnvironmentConfig) -> Self {
        Self {
            trucks,
            auth: Arc::new(auth),
            config,
        }
    }
}
