//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; PostgreSQL implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CarRepository`] - Car CRUD and filtered listing
//! - [`UserCarRepository`] - Rental bookings
//! - [`UserRepository`] - API users
//! - [`TokenRepository`] - API token authentication

pub mod car_repository;
pub mod token_repository;
pub mod user_car_repository;
pub mod user_repository;

pub use car_repository::{CarFilter, CarRepository};
pub use token_repository::{ApiToken, TokenRepository};
pub use user_car_repository::UserCarRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use car_repository::MockCarRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_car_repository::MockUserCarRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
