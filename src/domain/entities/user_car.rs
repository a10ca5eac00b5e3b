//! Rental booking entity joining a user and a car.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One rental booking: `user_id` rents `car_id` over `[rent_started_at, rent_ended_at]`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCar {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl UserCar {
    /// Returns true if the booking covers `at`.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.rent_started_at <= at && at <= self.rent_ended_at
    }
}

/// A closed rental interval.
///
/// Both bounds are inclusive. Construct through [`RentalPeriod::new`], which
/// enforces `start <= end` and fills in the default one-day length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl RentalPeriod {
    /// Builds a period, defaulting `end` to one day after `start`.
    ///
    /// Returns `None` if `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Option<Self> {
        let end = end.unwrap_or_else(|| start + Duration::days(1));
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Returns true if this period shares at least one instant with `[start, end]`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Input data for creating a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserCar {
    pub user_id: i64,
    pub car_id: i64,
    pub period: RentalPeriod,
    /// Whether the car should be flagged as rented together with the insert.
    pub mark_rented: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_period_defaults_to_one_day() {
        let period = RentalPeriod::new(at(10), None).unwrap();
        assert_eq!(period.end() - period.start(), Duration::days(1));
    }

    #[test]
    fn test_period_rejects_inverted_bounds() {
        assert!(RentalPeriod::new(at(12), Some(at(10))).is_none());
        assert!(RentalPeriod::new(at(10), Some(at(10))).is_some());
    }

    #[test]
    fn test_overlap_covers_containment_both_ways() {
        let period = RentalPeriod::new(at(8), Some(at(12))).unwrap();

        // Existing booking inside the request.
        assert!(period.overlaps(at(9), at(11)));
        // Request inside the existing booking.
        assert!(period.overlaps(at(6), at(14)));
        // Partial overlaps and shared endpoints.
        assert!(period.overlaps(at(11), at(15)));
        assert!(period.overlaps(at(12), at(13)));
        // Disjoint.
        assert!(!period.overlaps(at(13), at(15)));
        assert!(!period.overlaps(at(1), at(7)));
    }

    #[test]
    fn test_user_car_is_active_at() {
        let booking = UserCar {
            id: 1,
            user_id: 1,
            car_id: 1,
            rent_started_at: at(8),
            rent_ended_at: at(12),
            created_at: at(7),
        };

        assert!(booking.is_active_at(at(10)));
        assert!(!booking.is_active_at(at(13)));
    }

    #[test]
    fn test_user_car_serializes_camel_case() {
        let booking = UserCar {
            id: 3,
            user_id: 1,
            car_id: 2,
            rent_started_at: at(8),
            rent_ended_at: at(12),
            created_at: at(7),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["carId"], 2);
        assert!(json["rentStartedAt"].is_string());
        assert!(json["rentEndedAt"].is_string());
    }
}
