use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable interval of exactly one service duration, aligned to the
/// configured step within business hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub available: bool,
}

/// Coarse per-date classification used by the booking calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCategory {
    Unavailable,
    Limited,
    Available,
}

/// Outcome of validating a proposed booking. Validation failures are
/// expected and enumerable, so they are data rather than errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl BookingValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCalendarResponse {
    pub service_id: Uuid,
    pub days: BTreeMap<NaiveDate, DayCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirstAvailableStaffResponse {
    pub staff_id: Option<Uuid>,
}
