//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, CarService};

/// Services shared by every request.
///
/// Cheap to clone: each field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(car_service: Arc<CarService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            car_service,
            auth_service,
        }
    }
}
