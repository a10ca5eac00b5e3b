//! Root status and fallback handlers.

use axum::{
    Json,
    extract::OriginalUri,
    http::Method,
};

use crate::api::dto::root::RootResponse;
use crate::error::AppError;

/// Reports that the API is up.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::up())
}

/// Answers every unmatched route with a `NotFoundError`.
///
/// The error details echo the request method and URL.
pub async fn not_found_handler(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::route_not_found(method.as_str(), &uri.to_string())
}
