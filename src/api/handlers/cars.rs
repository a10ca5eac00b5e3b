//! Handlers for car endpoints: listing, CRUD and rentals.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::api::dto::car::{CarListResponse, CarRequest, ListCarsQuery, ListMeta};
use crate::api::dto::rent::RentRequest;
use crate::domain::entities::{Car, User, UserCar};
use crate::domain::repositories::CarFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Lists cars with pagination metadata.
///
/// # Endpoint
///
/// `GET /v1/cars`
///
/// # Query Parameters
///
/// - `size` (optional): exact size match
/// - `availableAt` (optional): RFC 3339 instant the car must be free at
/// - `page` (optional): page number (default: 1)
/// - `pageSize` (optional): items per page (default: 10, max: 100)
///
/// # Response
///
/// ```json
/// {
///   "cars": [ ... ],
///   "meta": { "pagination": { "page": 1, "pageCount": 1, "pageSize": 10, "count": 10 } }
/// }
/// ```
///
/// # Errors
///
/// Returns 422 if query parameters are malformed or out of range.
pub async fn list_cars_handler(
    State(state): State<AppState>,
    query: Result<Query<ListCarsQuery>, QueryRejection>,
) -> Result<Json<CarListResponse>, AppError> {
    let Query(query) = query?;
    query.pagination.validate()?;

    let filter = CarFilter::new(query.pagination.offset(), query.pagination.limit())
        .with_size(query.size)
        .with_available_at(query.available_at);

    let (cars, count) = state.car_service.list_cars(filter).await?;

    Ok(Json(CarListResponse {
        cars,
        meta: ListMeta {
            pagination: query.pagination.paginate(count),
        },
    }))
}

/// Creates a car.
///
/// # Endpoint
///
/// `POST /v1/cars` (admin)
///
/// # Errors
///
/// Returns 422 if the body is invalid or the car cannot be stored.
pub async fn create_car_handler(
    State(state): State<AppState>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let car = state
        .car_service
        .create_car(payload.into())
        .await
        .map_err(AppError::into_unprocessable)?;

    Ok((StatusCode::CREATED, Json(car)))
}

/// Retrieves a car by id.
///
/// # Endpoint
///
/// `GET /v1/cars/{id}`
///
/// # Errors
///
/// Returns 404 if the car does not exist.
pub async fn get_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Car>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.car_service.get_car(id).await?))
}

/// Replaces a car's name, price, size and image.
///
/// # Endpoint
///
/// `PUT /v1/cars/{id}` (admin)
///
/// # Errors
///
/// Returns 404 if the car does not exist.
/// Returns 422 if the body is invalid or the update fails.
pub async fn update_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<Car>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let car = state
        .car_service
        .update_car(id, payload.into())
        .await
        .map_err(AppError::into_unprocessable)?;

    Ok(Json(car))
}

/// Deletes a car.
///
/// # Endpoint
///
/// `DELETE /v1/cars/{id}` (admin)
///
/// Answers 204 with an empty body whether or not the car existed.
pub async fn delete_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.car_service.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rents a car for the authenticated user.
///
/// # Endpoint
///
/// `POST /v1/cars/{id}/rent`
///
/// # Request Body
///
/// ```json
/// { "rentStartedAt": "2026-05-01T10:00:00Z", "rentEndedAt": "2026-05-03T10:00:00Z" }
/// ```
///
/// `rentEndedAt` defaults to one day after `rentStartedAt`.
///
/// # Errors
///
/// Returns 404 if the car does not exist.
/// Returns 422 `CarAlreadyRentedError` if the car is rented or booked for an
/// overlapping period, and `ValidationError` for a malformed body.
/// Persistence failures propagate as 500.
pub async fn rent_car_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserCar>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let period = payload.period().ok_or_else(|| {
        AppError::validation(
            "rentEndedAt must not be before rentStartedAt",
            json!({
                "rentStartedAt": payload.rent_started_at,
                "rentEndedAt": payload.rent_ended_at,
            }),
        )
    })?;

    let user_car = state
        .car_service
        .rent_car(id, user.id, period, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(user_car)))
}

/// Finishes the authenticated user's current rental of a car.
///
/// # Endpoint
///
/// `POST /v1/cars/{id}/finish`
///
/// # Errors
///
/// Returns 404 if the car does not exist or the user has no started rental for it.
pub async fn finish_rental_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserCar>, AppError> {
    let Path(id) = id?;

    let user_car = state
        .car_service
        .finish_rental(id, user.id, Utc::now())
        .await?;

    Ok(Json(user_car))
}
