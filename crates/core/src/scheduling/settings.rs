use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::interval::TimeRange;
use crate::errors::{BookingError, BookingResult};

/// Opening hours of the shop. Every staff member's slots are generated
/// inside this window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusinessHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::Validation(format!(
                "Business hours must open before they close ({start} >= {end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses "HH:MM" opening and closing times, as supplied by the host
    /// configuration.
    pub fn parse(start: &str, end: &str) -> BookingResult<Self> {
        let parse_time = |value: &str| {
            NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|_| BookingError::Validation(format!("Invalid time of day: {value:?}")))
        };
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Booking policy owned by the host application, validated once at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSettings {
    pub business_hours: BusinessHours,
    /// Step between candidate slot starts, in minutes.
    pub slot_interval_minutes: u32,
    /// Minimum lead time between "now" and a bookable slot's start.
    pub advance_booking_hours: u32,
    /// A day with 1..=threshold free slots is classified as limited.
    pub limited_slot_threshold: u32,
}

impl BookingSettings {
    pub fn new(
        business_hours: BusinessHours,
        slot_interval_minutes: u32,
        advance_booking_hours: u32,
        limited_slot_threshold: u32,
    ) -> BookingResult<Self> {
        if slot_interval_minutes == 0 {
            return Err(BookingError::Validation(
                "Slot interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            business_hours,
            slot_interval_minutes,
            advance_booking_hours,
            limited_slot_threshold,
        })
    }
}
