//! Core domain entities representing the rental data model.
//!
//! Entities are plain data structures. They serialize with camelCase keys so
//! handlers can return them as JSON without a separate response type.
//!
//! # Entity Types
//!
//! - [`Car`] - A rentable car
//! - [`UserCar`] - One rental booking of a car by a user
//! - [`User`] - An API user owning tokens and bookings
//!
//! Creation inputs live in separate structs (`NewCar`, `NewUserCar`, `NewUser`).

pub mod car;
pub mod user;
pub mod user_car;

pub use car::{Car, NewCar};
pub use user::{NewUser, Role, User};
pub use user_car::{NewUserCar, RentalPeriod, UserCar};
