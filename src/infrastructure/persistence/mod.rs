//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgCarRepository`] - Car storage and filtered listing
//! - [`PgUserCarRepository`] - Rental bookings with row-locked creation
//! - [`PgUserRepository`] - API users
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_car_repository;
pub mod pg_token_repository;
pub mod pg_user_car_repository;
pub mod pg_user_repository;
mod rows;

pub use pg_car_repository::PgCarRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_car_repository::PgUserCarRepository;
pub use pg_user_repository::PgUserRepository;
