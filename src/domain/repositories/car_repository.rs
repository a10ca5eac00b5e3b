//! Repository trait for car data access.

use crate::domain::entities::{Car, NewCar};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filter criteria for car listings.
///
/// `size` matches exactly. `available_at` drops cars with a booking covering
/// that instant. `offset`/`limit` only apply to [`CarRepository::list`];
/// [`CarRepository::count`] ignores them.
#[derive(Debug, Clone, PartialEq)]
pub struct CarFilter {
    pub size: Option<String>,
    pub available_at: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
}

impl CarFilter {
    /// Creates a new filter with pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            size: None,
            available_at: None,
            offset,
            limit,
        }
    }

    pub fn with_size(mut self, size: Option<String>) -> Self {
        self.size = size.filter(|s| !s.is_empty());
        self
    }

    pub fn with_available_at(mut self, available_at: Option<DateTime<Utc>>) -> Self {
        self.available_at = available_at;
        self
    }
}

/// Repository interface for cars.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCarRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Inserts a car. New cars are never flagged as rented.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError>;

    /// Finds a car by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError>;

    /// Lists one page of cars matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError>;

    /// Counts all cars matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: &CarFilter) -> Result<i64, AppError>;

    /// Round-trips a trivial query to check the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;

    /// Replaces the descriptive fields of a car and clears its rented flag.
    ///
    /// Returns `Ok(None)` if no car has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, car: NewCar) -> Result<Option<Car>, AppError>;

    /// Deletes a car and its bookings.
    ///
    /// Returns `Ok(false)` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
