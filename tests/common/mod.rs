#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::{Arc, Mutex, MutexGuard};

use car_rental::api;
use car_rental::api::handlers::{health_handler, not_found_handler, root_handler};
use car_rental::application::services::auth_service::hash_token;
use car_rental::application::services::{AuthService, CarService};
use car_rental::domain::entities::{Car, NewCar, NewUserCar, RentalPeriod, Role, User, UserCar};
use car_rental::domain::repositories::{
    ApiToken, CarFilter, CarRepository, TokenRepository, UserCarRepository,
};
use car_rental::error::AppError;
use car_rental::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ADMIN_ID: i64 = 1;
pub const CUSTOMER_ID: i64 = 2;

// ─── IN-MEMORY STORE ─────────────────────────────────────────────────────────

/// Shared tables behind the in-memory repositories.
#[derive(Default)]
pub struct Store {
    pub cars: Vec<Car>,
    pub bookings: Vec<UserCar>,
    /// Makes every car write fail with an internal error.
    pub fail_writes: bool,
    /// Makes the health ping fail.
    pub unreachable: bool,
    next_car_id: i64,
    next_booking_id: i64,
}

impl Store {
    pub fn insert_car(&mut self, new_car: NewCar, rented: bool) -> Car {
        self.next_car_id += 1;
        let car = Car {
            id: self.next_car_id,
            name: new_car.name,
            price: new_car.price,
            size: new_car.size,
            image: new_car.image,
            is_currently_rented: rented,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.cars.push(car.clone());
        car
    }

    pub fn seed_car(&mut self, name: &str, size: &str, rented: bool) -> Car {
        self.insert_car(
            NewCar {
                name: name.to_string(),
                price: 100_000.0,
                size: size.to_string(),
                image: format!("{}.jpg", name.to_lowercase()),
            },
            rented,
        )
    }

    pub fn insert_booking(
        &mut self,
        car_id: i64,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> UserCar {
        self.next_booking_id += 1;
        let booking = UserCar {
            id: self.next_booking_id,
            user_id,
            car_id,
            rent_started_at: start,
            rent_ended_at: end,
            created_at: Utc::now(),
        };
        self.bookings.push(booking.clone());
        booking
    }

    pub fn car(&self, id: i64) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }

    fn matches(&self, car: &Car, filter: &CarFilter) -> bool {
        let size_ok = filter.size.as_ref().is_none_or(|s| &car.size == s);
        let free_ok = filter.available_at.is_none_or(|at| {
            !self
                .bookings
                .iter()
                .any(|b| b.car_id == car.id && b.is_active_at(at))
        });
        size_ok && free_ok
    }
}

pub type SharedStore = Arc<Mutex<Store>>;

fn lock(store: &SharedStore) -> MutexGuard<'_, Store> {
    store.lock().unwrap()
}

fn write_failure() -> AppError {
    AppError::internal("insert or update on table \"cars\" failed", Value::Null)
}

pub struct InMemoryCarRepository {
    store: SharedStore,
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let mut store = lock(&self.store);
        if store.fail_writes {
            return Err(write_failure());
        }
        Ok(store.insert_car(new_car, false))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        Ok(lock(&self.store).car(id).cloned())
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError> {
        let store = lock(&self.store);
        let mut cars: Vec<Car> = store
            .cars
            .iter()
            .filter(|c| store.matches(c, filter))
            .cloned()
            .collect();
        cars.sort_by_key(|c| c.id);
        Ok(cars
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if lock(&self.store).unreachable {
            return Err(AppError::internal("Database error", Value::Null));
        }
        Ok(())
    }

    async fn count(&self, filter: &CarFilter) -> Result<i64, AppError> {
        let store = lock(&self.store);
        Ok(store.cars.iter().filter(|c| store.matches(c, filter)).count() as i64)
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<Option<Car>, AppError> {
        let mut store = lock(&self.store);
        if store.fail_writes {
            return Err(write_failure());
        }
        Ok(store.cars.iter_mut().find(|c| c.id == id).map(|stored| {
            stored.name = car.name;
            stored.price = car.price;
            stored.size = car.size;
            stored.image = car.image;
            stored.is_currently_rented = false;
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = lock(&self.store);
        let before = store.cars.len();
        store.cars.retain(|c| c.id != id);
        store.bookings.retain(|b| b.car_id != id);
        Ok(store.cars.len() < before)
    }
}

pub struct InMemoryUserCarRepository {
    store: SharedStore,
}

#[async_trait]
impl UserCarRepository for InMemoryUserCarRepository {
    async fn find_overlapping(
        &self,
        car_id: i64,
        period: RentalPeriod,
    ) -> Result<Option<UserCar>, AppError> {
        Ok(lock(&self.store)
            .bookings
            .iter()
            .find(|b| b.car_id == car_id && period.overlaps(b.rent_started_at, b.rent_ended_at))
            .cloned())
    }

    async fn create(&self, new_user_car: NewUserCar) -> Result<UserCar, AppError> {
        let mut store = lock(&self.store);
        let car = store
            .car(new_user_car.car_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Car not found!", json!({ "id": new_user_car.car_id })))?;

        let period = new_user_car.period;
        let conflict = store.bookings.iter().any(|b| {
            b.car_id == car.id && period.overlaps(b.rent_started_at, b.rent_ended_at)
        });
        if conflict || car.is_currently_rented {
            return Err(AppError::car_already_rented(&car));
        }

        let booking = store.insert_booking(
            car.id,
            new_user_car.user_id,
            period.start(),
            period.end(),
        );
        if new_user_car.mark_rented
            && let Some(stored) = store.cars.iter_mut().find(|c| c.id == car.id)
        {
            stored.is_currently_rented = true;
        }
        Ok(booking)
    }

    async fn find_active(
        &self,
        car_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError> {
        Ok(lock(&self.store)
            .bookings
            .iter()
            .filter(|b| b.car_id == car_id && b.user_id == user_id && b.is_active_at(at))
            .max_by_key(|b| (b.rent_started_at, b.id))
            .cloned())
    }

    async fn finish(&self, id: i64, ended_at: DateTime<Utc>) -> Result<UserCar, AppError> {
        let mut store = lock(&self.store);
        let booking = store
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Rental not found", json!({ "id": id })))?;

        booking.rent_ended_at = booking
            .rent_ended_at
            .min(booking.rent_started_at.max(ended_at));
        let finished = booking.clone();

        if let Some(car) = store.cars.iter_mut().find(|c| c.id == finished.car_id) {
            car.is_currently_rented = false;
        }
        Ok(finished)
    }
}

/// Token repository holding the admin and customer fixtures.
pub struct InMemoryTokenRepository {
    owners: Vec<(String, User)>,
}

impl InMemoryTokenRepository {
    pub fn with_fixture_users() -> Self {
        Self {
            owners: vec![
                (hash_token(TEST_SECRET, ADMIN_TOKEN), test_user(ADMIN_ID, Role::Admin)),
                (
                    hash_token(TEST_SECRET, CUSTOMER_TOKEN),
                    test_user(CUSTOMER_ID, Role::Customer),
                ),
            ],
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .owners
            .iter()
            .find(|(hash, _)| hash == token_hash)
            .map(|(_, user)| user.clone()))
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_token(
        &self,
        _user_id: i64,
        _name: &str,
        _token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        Err(AppError::internal("read-only fixture", Value::Null))
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn revoke_token(&self, _id: i64) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn test_user(id: i64, role: Role) -> User {
    User {
        id,
        name: format!("{role} {id}"),
        email: format!("user{id}@bcr.io"),
        role,
        created_at: Utc::now(),
    }
}

/// State backed by in-memory repositories, plus a handle on their tables.
pub fn create_memory_state() -> (AppState, SharedStore) {
    let store = SharedStore::default();

    let car_service = Arc::new(CarService::new(
        Arc::new(InMemoryCarRepository {
            store: store.clone(),
        }),
        Arc::new(InMemoryUserCarRepository {
            store: store.clone(),
        }),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryTokenRepository::with_fixture_users()),
        TEST_SECRET.to_string(),
    ));

    (AppState::new(car_service, auth_service), store)
}

/// Application routes without rate limiting, which needs a real peer address.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest(
            "/v1",
            api::routes::public_routes().merge(api::routes::secured_routes(&state)),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// ─── DATABASE FIXTURES ───────────────────────────────────────────────────────

pub async fn create_test_user(pool: &PgPool, email: &str, role: Role) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id")
        .bind("Test User")
        .bind(email)
        .bind(role.as_str())
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_car(pool: &PgPool, name: &str, size: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO cars (name, price, size, image) VALUES ($1, 100000, $2, 'car.jpg') RETURNING id",
    )
    .bind(name)
    .bind(size)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_booking(
    pool: &PgPool,
    user_id: i64,
    car_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO user_cars (user_id, car_id, rent_started_at, rent_ended_at)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(car_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .unwrap()
}
