//! API route configuration for the `/v1` prefix.
//!
//! Reads are public. Rentals and `whoami` need a Bearer token
//! ([`crate::api::middleware::auth`]); car mutations additionally need the
//! `ADMIN` role.

use crate::api::handlers::{
    create_car_handler, delete_car_handler, finish_rental_handler, get_car_handler,
    list_cars_handler, rent_car_handler, update_car_handler, whoami_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

/// Routes open to anonymous callers.
///
/// - `GET /cars`       - List cars (filtered, paginated)
/// - `GET /cars/{id}`  - Fetch one car
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars_handler))
        .route("/cars/{id}", get(get_car_handler))
}

/// Routes for any authenticated user.
///
/// - `POST /cars/{id}/rent`    - Book a car for an interval
/// - `POST /cars/{id}/finish`  - Close the caller's active booking
/// - `GET  /auth/whoami`       - Current user
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/cars/{id}/rent", post(rent_car_handler))
        .route("/cars/{id}/finish", post(finish_rental_handler))
        .route("/auth/whoami", get(whoami_handler))
}

/// Routes reserved to administrators.
///
/// - `POST   /cars`       - Create a car
/// - `PUT    /cars/{id}`  - Update a car
/// - `DELETE /cars/{id}`  - Delete a car
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", post(create_car_handler))
        .route("/cars/{id}", put(update_car_handler).delete(delete_car_handler))
}

/// User and admin routes behind Bearer authentication.
///
/// Authentication runs first and the admin check second, so a missing token
/// is always a 401 and a customer token on an admin route is a 403.
pub fn secured_routes(state: &AppState) -> Router<AppState> {
    let admin = admin_routes().route_layer(middleware::from_fn(auth::require_admin));

    user_routes()
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}
