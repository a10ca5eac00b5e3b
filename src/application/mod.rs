//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::car_service::CarService`] - Car CRUD and rentals
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
