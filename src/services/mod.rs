//! Servicios de la aplicación

pub mod auth_service;

pub use auth_service::AuthService;
