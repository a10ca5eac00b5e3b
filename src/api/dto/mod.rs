//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use Serde for deserialization and `validator` for input
//! validation. JSON keys are camelCase.

pub mod car;
pub mod health;
pub mod pagination;
pub mod rent;
pub mod root;
