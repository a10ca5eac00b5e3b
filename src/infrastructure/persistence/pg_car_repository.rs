//! PostgreSQL implementation of car repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{CAR_COLUMNS, CarRow};
use crate::domain::entities::{Car, NewCar};
use crate::domain::repositories::{CarFilter, CarRepository};
use crate::error::AppError;

/// Filter predicate shared by `list` and `count`.
///
/// `$1` is the optional size, `$2` the optional instant the car must be free at.
const FILTER_CLAUSE: &str = r#"
    ($1::TEXT IS NULL OR c.size = $1)
    AND (
        $2::TIMESTAMPTZ IS NULL
        OR NOT EXISTS (
            SELECT 1 FROM user_cars uc
            WHERE uc.car_id = c.id
              AND uc.rent_started_at <= $2
              AND uc.rent_ended_at >= $2
        )
    )
"#;

/// PostgreSQL repository for cars.
pub struct PgCarRepository {
    pool: Arc<PgPool>,
}

impl PgCarRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let sql = format!(
            "INSERT INTO cars (name, price, size, image, is_currently_rented)
             VALUES ($1, $2, $3, $4, FALSE)
             RETURNING {CAR_COLUMNS}"
        );

        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(new_car.name)
            .bind(new_car.price)
            .bind(new_car.size)
            .bind(new_car.image)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let sql = format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1");

        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Car::from))
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError> {
        let sql = format!(
            "SELECT {columns} FROM cars c WHERE {FILTER_CLAUSE} ORDER BY c.id LIMIT $3 OFFSET $4",
            columns = prefixed_car_columns(),
        );

        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .bind(filter.size.as_deref())
            .bind(filter.available_at)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn count(&self, filter: &CarFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM cars c WHERE {FILTER_CLAUSE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.size.as_deref())
            .bind(filter.available_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<Option<Car>, AppError> {
        let sql = format!(
            "UPDATE cars
             SET name = $2, price = $3, size = $4, image = $5,
                 is_currently_rented = FALSE, updated_at = NOW()
             WHERE id = $1
             RETURNING {CAR_COLUMNS}"
        );

        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(id)
            .bind(car.name)
            .bind(car.price)
            .bind(car.size)
            .bind(car.image)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Car::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn prefixed_car_columns() -> String {
    CAR_COLUMNS
        .split(", ")
        .map(|col| format!("c.{col}"))
        .collect::<Vec<_>>()
        .join(", ")
}
