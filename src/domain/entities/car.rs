//! Car entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A car available for rent.
///
/// `is_currently_rented` is set when a booking covering the current instant is
/// created and cleared when that booking is finished.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a car, also used as the full replacement on update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub name: String,
    pub price: f64,
    pub size: String,
    pub image: String,
}
