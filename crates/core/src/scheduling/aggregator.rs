//! Bulk availability categorization. The caller fetches one snapshot up
//! front (a fixed number of bulk queries, independent of range length);
//! the loop below is pure in-memory computation over it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::calendar::AvailabilitySnapshot;
use super::settings::BookingSettings;
use super::slots;
use crate::errors::{BookingError, BookingResult};
use crate::models::slot::DayCategory;

/// Classify a free-slot count: none, a handful, or plenty.
pub fn categorize(count: usize, settings: &BookingSettings) -> DayCategory {
    if count == 0 {
        DayCategory::Unavailable
    } else if count <= settings.limited_slot_threshold as usize {
        DayCategory::Limited
    } else {
        DayCategory::Available
    }
}

/// Every date in the range marked unavailable. Used when the requested
/// service does not exist, so calendar rendering stays resilient instead
/// of erroring.
pub fn unavailable_range(
    start: NaiveDate,
    end: NaiveDate,
) -> BookingResult<BTreeMap<NaiveDate, DayCategory>> {
    validate_range(start, end)?;
    Ok(dates(start, end)
        .map(|date| (date, DayCategory::Unavailable))
        .collect())
}

/// Bucket every date in the range by how many bookable slots remain. Days
/// whose earliest slot misses the advance-booking cutoff are classified
/// unavailable without being walked. An empty roster makes every date
/// unavailable.
pub fn bulk_availability(
    snapshot: &AvailabilitySnapshot,
    start: NaiveDate,
    end: NaiveDate,
    settings: &BookingSettings,
    now: NaiveDateTime,
) -> BookingResult<BTreeMap<NaiveDate, DayCategory>> {
    validate_range(start, end)?;
    if snapshot.service.duration_minutes <= 0 {
        return Err(BookingError::InvalidRange(format!(
            "Service {} has a non-positive duration",
            snapshot.service.id
        )));
    }
    if snapshot.staff.is_empty() {
        return unavailable_range(start, end);
    }

    Ok(dates(start, end)
        .map(|date| {
            let count = slots::count_available_slots(snapshot, date, settings, now);
            (date, categorize(count, settings))
        })
        .collect())
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> BookingResult<()> {
    if end < start {
        return Err(BookingError::InvalidRange(format!(
            "End date {end} is before start date {start}"
        )));
    }
    Ok(())
}

fn dates(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |date| *date <= end)
}
