//! Business logic services for the application layer.

pub mod auth_service;
pub mod car_service;

pub use auth_service::AuthService;
pub use car_service::CarService;
