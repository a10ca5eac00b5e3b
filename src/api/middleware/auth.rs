//! Bearer token authentication and role checks.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`User`] is inserted into the request extensions,
/// where handlers pick it up with `Extension<User>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// token is unknown or revoked.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/cars/{id}/rent", post(rent_car_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;
    tracing::debug!(user_id = user.id, role = %user.role, "Request authenticated");

    parts.extensions.insert(user);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Lets the request through only for users with the `ADMIN` role.
///
/// Must run inside [`layer`], which provides the [`User`] extension.
///
/// # Errors
///
/// Returns `403 Forbidden` (`InsufficientAccessError`) for any other role,
/// and `401 Unauthorized` if no user was authenticated.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.extensions().get::<User>().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({ "reason": "No authenticated user" }))
    })?;

    if !user.is_admin() {
        return Err(AppError::forbidden(
            "Access forbidden!",
            json!({
                "role": user.role,
                "reason": "ADMIN role is required",
            }),
        ));
    }

    Ok(next.run(req).await)
}
