//! Handlers about the authenticated caller.

use axum::{Extension, Json};

use crate::domain::entities::User;

/// Returns the user owning the Bearer token.
///
/// # Endpoint
///
/// `GET /v1/auth/whoami`
pub async fn whoami_handler(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
