//! DTOs for car endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::pagination::{Pagination, PaginationParams, optional_rfc3339};
use crate::domain::entities::{Car, NewCar};

/// Query parameters of `GET /v1/cars`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsQuery {
    /// Exact size match, e.g. `Large`.
    pub size: Option<String>,

    /// Only cars without a booking covering this instant (RFC 3339).
    #[serde(default, with = "optional_rfc3339")]
    pub available_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Body of `POST /v1/cars` and `PUT /v1/cars/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct CarRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(length(min = 1, max = 50, message = "Size must not be empty"))]
    pub size: String,

    #[validate(length(min = 1, max = 2048, message = "Image must not be empty"))]
    pub image: String,
}

impl From<CarRequest> for NewCar {
    fn from(req: CarRequest) -> Self {
        NewCar {
            name: req.name,
            price: req.price,
            size: req.size,
            image: req.image,
        }
    }
}

/// Body of `GET /v1/cars`.
#[derive(Debug, Serialize)]
pub struct CarListResponse {
    pub cars: Vec<Car>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub pagination: Pagination,
}
