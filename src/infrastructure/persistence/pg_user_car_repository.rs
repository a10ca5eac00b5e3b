//! PostgreSQL implementation of the booking repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{CAR_COLUMNS, CarRow, USER_CAR_COLUMNS, UserCarRow};
use crate::domain::entities::{Car, NewUserCar, RentalPeriod, UserCar};
use crate::domain::repositories::UserCarRepository;
use crate::error::AppError;

/// PostgreSQL repository for rental bookings.
///
/// Booking creation locks the car row, so concurrent rent requests for one
/// car are serialized and the overlap check cannot race the insert.
pub struct PgUserCarRepository {
    pool: Arc<PgPool>,
}

impl PgUserCarRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserCarRepository for PgUserCarRepository {
    async fn find_overlapping(
        &self,
        car_id: i64,
        period: RentalPeriod,
    ) -> Result<Option<UserCar>, AppError> {
        let sql = format!(
            "SELECT {USER_CAR_COLUMNS}
             FROM user_cars
             WHERE car_id = $1
               AND rent_started_at <= $3
               AND rent_ended_at >= $2
             ORDER BY rent_started_at
             LIMIT 1"
        );

        let row = sqlx::query_as::<_, UserCarRow>(&sql)
            .bind(car_id)
            .bind(period.start())
            .bind(period.end())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UserCar::from))
    }

    async fn create(&self, new_user_car: NewUserCar) -> Result<UserCar, AppError> {
        let mut tx = self.pool.begin().await?;

        let car_sql = format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1 FOR UPDATE");
        let car: Car = sqlx::query_as::<_, CarRow>(&car_sql)
            .bind(new_user_car.car_id)
            .fetch_optional(&mut *tx)
            .await?
            .map(Car::from)
            .ok_or_else(|| {
                AppError::not_found("Car not found!", json!({ "id": new_user_car.car_id }))
            })?;

        let conflict: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_cars
                WHERE car_id = $1
                  AND rent_started_at <= $3
                  AND rent_ended_at >= $2
            )
            "#,
        )
        .bind(car.id)
        .bind(new_user_car.period.start())
        .bind(new_user_car.period.end())
        .fetch_one(&mut *tx)
        .await?;

        if conflict || car.is_currently_rented {
            // Dropping `tx` rolls back and releases the row lock.
            return Err(AppError::car_already_rented(&car));
        }

        let insert_sql = format!(
            "INSERT INTO user_cars (user_id, car_id, rent_started_at, rent_ended_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_CAR_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserCarRow>(&insert_sql)
            .bind(new_user_car.user_id)
            .bind(car.id)
            .bind(new_user_car.period.start())
            .bind(new_user_car.period.end())
            .fetch_one(&mut *tx)
            .await?;

        if new_user_car.mark_rented {
            sqlx::query("UPDATE cars SET is_currently_rented = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(car.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_active(
        &self,
        car_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError> {
        let sql = format!(
            "SELECT {USER_CAR_COLUMNS}
             FROM user_cars
             WHERE car_id = $1 AND user_id = $2
               AND rent_started_at <= $3
               AND rent_ended_at >= $3
             ORDER BY rent_started_at DESC
             LIMIT 1"
        );

        let row = sqlx::query_as::<_, UserCarRow>(&sql)
            .bind(car_id)
            .bind(user_id)
            .bind(at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UserCar::from))
    }

    async fn finish(&self, id: i64, ended_at: DateTime<Utc>) -> Result<UserCar, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE user_cars
             SET rent_ended_at = LEAST(rent_ended_at, GREATEST(rent_started_at, $2))
             WHERE id = $1
             RETURNING {USER_CAR_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserCarRow>(&sql)
            .bind(id)
            .bind(ended_at)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Rental not found", json!({ "id": id })))?;

        sqlx::query("UPDATE cars SET is_currently_rented = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(row.car_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }
}
