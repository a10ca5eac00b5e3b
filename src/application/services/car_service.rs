//! Car management and rental service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Car, NewCar, NewUserCar, RentalPeriod, UserCar};
use crate::domain::repositories::{CarFilter, CarRepository, UserCarRepository};
use crate::error::AppError;

/// Service for car CRUD and rentals.
///
/// Holds the car and booking repositories. Renting enforces that a car
/// flagged as rented, or with a booking overlapping the requested period,
/// cannot be booked again.
pub struct CarService {
    car_repository: Arc<dyn CarRepository>,
    user_car_repository: Arc<dyn UserCarRepository>,
}

impl CarService {
    /// Creates a new car service.
    pub fn new(
        car_repository: Arc<dyn CarRepository>,
        user_car_repository: Arc<dyn UserCarRepository>,
    ) -> Self {
        Self {
            car_repository,
            user_car_repository,
        }
    }

    /// Lists one page of cars and the total count for the same filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_cars(&self, filter: CarFilter) -> Result<(Vec<Car>, i64), AppError> {
        tokio::try_join!(
            self.car_repository.list(&filter),
            self.car_repository.count(&filter)
        )
    }

    /// Checks that the car store answers.
    pub async fn check_database(&self) -> Result<(), AppError> {
        self.car_repository.ping().await
    }

    /// Creates a car. New cars start out not rented.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_car(&self, new_car: NewCar) -> Result<Car, AppError> {
        let car = self.car_repository.create(new_car).await?;
        tracing::info!(car_id = car.id, name = %car.name, "Car created");
        Ok(car)
    }

    /// Retrieves a car by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no car has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_car(&self, id: i64) -> Result<Car, AppError> {
        self.car_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| car_not_found(id))
    }

    /// Replaces name, price, size and image of a car. The car is marked not rented.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no car has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_car(&self, id: i64, car: NewCar) -> Result<Car, AppError> {
        self.car_repository
            .update(id, car)
            .await?
            .ok_or_else(|| car_not_found(id))
    }

    /// Deletes a car. Deleting a missing car is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_car(&self, id: i64) -> Result<(), AppError> {
        if !self.car_repository.delete(id).await? {
            tracing::debug!(car_id = id, "Delete requested for missing car");
        }
        Ok(())
    }

    /// Books `car_id` for `user_id` over `period`.
    ///
    /// The car is flagged as rented when the period covers `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    /// Returns [`AppError::CarAlreadyRented`] if the car is flagged as rented
    /// or has a booking overlapping `period`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn rent_car(
        &self,
        car_id: i64,
        user_id: i64,
        period: RentalPeriod,
        now: DateTime<Utc>,
    ) -> Result<UserCar, AppError> {
        let car = self.get_car(car_id).await?;

        let overlapping = self
            .user_car_repository
            .find_overlapping(car.id, period)
            .await?;

        if overlapping.is_some() || car.is_currently_rented {
            tracing::info!(car_id = car.id, user_id, "Rent rejected, car already rented");
            return Err(AppError::car_already_rented(&car));
        }

        let user_car = self
            .user_car_repository
            .create(NewUserCar {
                user_id,
                car_id: car.id,
                period,
                mark_rented: period.contains(now),
            })
            .await?;

        tracing::info!(
            car_id = car.id,
            user_id,
            user_car_id = user_car.id,
            "Car rented"
        );

        Ok(user_car)
    }

    /// Finishes the booking of `car_id` by `user_id` that is active at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist or the user
    /// has no booking for it that is active at `now`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn finish_rental(
        &self,
        car_id: i64,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<UserCar, AppError> {
        let car = self.get_car(car_id).await?;

        let booking = self
            .user_car_repository
            .find_active(car.id, user_id, now)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No active rental found",
                    json!({ "carId": car.id, "userId": user_id }),
                )
            })?;

        let finished = self.user_car_repository.finish(booking.id, now).await?;

        tracing::info!(car_id = car.id, user_id, user_car_id = finished.id, "Rental finished");

        Ok(finished)
    }
}

fn car_not_found(id: i64) -> AppError {
    AppError::not_found("Car not found!", json!({ "id": id }))
}
