//! Row types shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Car, User, UserCar};
use crate::error::AppError;

pub(crate) const CAR_COLUMNS: &str =
    "id, name, price, size, image, is_currently_rented, created_at, updated_at";

pub(crate) const USER_CAR_COLUMNS: &str =
    "id, user_id, car_id, rent_started_at, rent_ended_at, created_at";

pub(crate) const USER_COLUMNS: &str = "id, name, email, role, created_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CarRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(r: CarRow) -> Self {
        Car {
            id: r.id,
            name: r.name,
            price: r.price,
            size: r.size,
            image: r.image,
            is_currently_rented: r.is_currently_rented,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserCarRow {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<UserCarRow> for UserCar {
    fn from(r: UserCarRow) -> Self {
        UserCar {
            id: r.id,
            user_id: r.user_id,
            car_id: r.car_id,
            rent_started_at: r.rent_started_at,
            rent_ended_at: r.rent_ended_at,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = r.role.parse().map_err(|reason: String| {
            AppError::internal(
                "Corrupted user role",
                json!({ "user_id": r.id, "reason": reason }),
            )
        })?;

        Ok(User {
            id: r.id,
            name: r.name,
            email: r.email,
            role,
            created_at: r.created_at,
        })
    }
}
