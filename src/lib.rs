//! Backend de gestión de flota
//!
//! Registros de camiones, su almacenamiento y una API JSON sobre ellos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
