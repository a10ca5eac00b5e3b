//! DTO for the rent endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::RentalPeriod;

/// Body of `POST /v1/cars/{id}/rent`.
///
/// `rentEndedAt` defaults to one day after `rentStartedAt`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRequest {
    pub rent_started_at: DateTime<Utc>,
    #[serde(default)]
    pub rent_ended_at: Option<DateTime<Utc>>,
}

impl RentRequest {
    /// Returns `None` if the end precedes the start.
    pub fn period(&self) -> Option<RentalPeriod> {
        RentalPeriod::new(self.rent_started_at, self.rent_ended_at)
    }
}
