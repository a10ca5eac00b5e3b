//! Repository trait for rental bookings.

use crate::domain::entities::{NewUserCar, RentalPeriod, UserCar};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for `UserCar` bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCarRepository: Send + Sync {
    /// Finds any booking of `car_id` sharing at least one instant with `period`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_overlapping(
        &self,
        car_id: i64,
        period: RentalPeriod,
    ) -> Result<Option<UserCar>, AppError>;

    /// Creates a booking and, when `mark_rented` is set, flags the car as rented.
    ///
    /// Implementations must make the overlap check and the insert atomic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CarAlreadyRented`] if a conflicting booking appeared
    /// since the caller's check.
    /// Returns [`AppError::NotFound`] if the car no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user_car: NewUserCar) -> Result<UserCar, AppError>;

    /// Finds the booking of `car_id` by `user_id` whose period contains `at`.
    ///
    /// Bookings that already ended or have not started yet are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active(
        &self,
        car_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError>;

    /// Ends booking `id` no later than `ended_at` and clears the rented flag of its car.
    ///
    /// A booking whose end is already before `ended_at` keeps its end.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the booking does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn finish(&self, id: i64, ended_at: DateTime<Utc>) -> Result<UserCar, AppError>;
}
