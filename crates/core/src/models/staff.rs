use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduling::interval::TimeRange;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    /// Services this member is qualified to perform.
    pub service_ids: Vec<Uuid>,
    pub is_active: bool,
}

/// Recurring weekly availability window. A staff member may have several
/// entries for the same weekday (split shifts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSchedule {
    pub staff_id: Uuid,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub effective_from: Option<NaiveDate>,
    pub effective_until: Option<NaiveDate>,
    pub is_active: bool,
}

impl BaseSchedule {
    /// Whether this entry is in force on the given date: active, matching
    /// weekday, and inside the effective date bounds when they are set.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && u32::from(self.day_of_week) == date.weekday().num_days_from_sunday()
            && self.effective_from.is_none_or(|from| date >= from)
            && self.effective_until.is_none_or(|until| date <= until)
    }

    pub fn window(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// One-off override for a single calendar date. Without a start/end pair it
/// covers the whole day; with one it overrides only that sub-interval and
/// the rest of the day falls back to the base schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateException {
    pub staff_id: Uuid,
    pub exception_date: NaiveDate,
    pub is_available: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl DateException {
    /// The overridden sub-interval, or `None` for an all-day exception.
    pub fn time_range(&self) -> Option<TimeRange> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)),
            _ => None,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.time_range().is_none()
    }
}

/// Multi-day absence. Only approved periods block availability, and an
/// approved period blanks every covered day outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationPeriod {
    pub staff_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_approved: bool,
}

impl VacationPeriod {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_approved && self.start_date <= date && date <= self.end_date
    }
}
