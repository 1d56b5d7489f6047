//! Three-tier availability resolution for one staff member and one date.
//! An approved vacation blanks the whole day. Otherwise date exceptions
//! decide the portions of the day they cover: an all-day exception decides
//! everything, and time-scoped exceptions claim their sub-ranges in stored
//! order (the first exception covering an instant wins). Whatever no
//! exception claims falls through to the base weekly schedule, where a time
//! is available if ANY active, date-effective entry contains it.

use chrono::{NaiveDate, NaiveTime};

use super::calendar::StaffCalendar;
use super::interval::{self, TimeRange};

/// Point query: is the staff member available at `at` on `date`?
pub fn is_available_at(calendar: &StaffCalendar, date: NaiveDate, at: NaiveTime) -> bool {
    if calendar.on_vacation(date) {
        return false;
    }

    let exceptions = calendar.exceptions_on(date);
    if let Some(all_day) = exceptions.iter().find(|e| e.is_all_day()) {
        return all_day.is_available;
    }
    for exception in exceptions {
        if let Some(range) = exception.time_range() {
            if range.contains(at) {
                return exception.is_available;
            }
        }
    }

    in_base_schedule(calendar, date, at)
}

fn in_base_schedule(calendar: &StaffCalendar, date: NaiveDate, at: NaiveTime) -> bool {
    calendar
        .base_schedules
        .iter()
        .any(|entry| entry.applies_on(date) && entry.window().contains(at))
}

/// The piecewise available windows on `date`, clipped to `within`
/// (normally business hours). The result is sorted, disjoint, and merged,
/// so a span is fully available iff a single window covers it.
pub fn available_windows(
    calendar: &StaffCalendar,
    date: NaiveDate,
    within: &TimeRange,
) -> Vec<TimeRange> {
    if calendar.on_vacation(date) {
        return Vec::new();
    }

    let exceptions = calendar.exceptions_on(date);
    if let Some(all_day) = exceptions.iter().find(|e| e.is_all_day()) {
        return if all_day.is_available {
            vec![*within]
        } else {
            Vec::new()
        };
    }

    let mut available: Vec<TimeRange> = Vec::new();
    // Portions of the day already decided by an earlier exception.
    let mut claimed: Vec<TimeRange> = Vec::new();

    for exception in exceptions {
        let Some(range) = exception.time_range() else {
            continue;
        };
        let Some(range) = range.clip(within) else {
            continue;
        };
        let fresh = interval::subtract_ranges(&[range], &claimed);
        if exception.is_available {
            available.extend(fresh.iter().copied());
        }
        claimed = interval::merge_ranges(claimed.into_iter().chain(fresh).collect());
    }

    let base = interval::merge_ranges(
        calendar
            .base_schedules
            .iter()
            .filter(|entry| entry.applies_on(date))
            .filter_map(|entry| entry.window().clip(within))
            .collect(),
    );
    available.extend(interval::subtract_ranges(&base, &claimed));

    interval::merge_ranges(available)
}
