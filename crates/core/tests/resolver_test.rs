use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use detailbook_core::models::staff::{BaseSchedule, DateException, VacationPeriod};
use detailbook_core::scheduling::calendar::StaffCalendar;
use detailbook_core::scheduling::interval::TimeRange;
use detailbook_core::scheduling::resolver::{available_windows, is_available_at};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn range(sh: u32, sm: u32, eh: u32, em: u32) -> TimeRange {
    TimeRange::new(time(sh, sm), time(eh, em))
}

// 2025-06-09 is a Monday.
const MONDAY: (i32, u32, u32) = (2025, 6, 9);

fn monday() -> NaiveDate {
    date(MONDAY.0, MONDAY.1, MONDAY.2)
}

fn business_hours() -> TimeRange {
    range(9, 0, 17, 0)
}

fn weekday_schedule(day_of_week: u8, start: NaiveTime, end: NaiveTime) -> BaseSchedule {
    BaseSchedule {
        staff_id: Uuid::new_v4(),
        day_of_week,
        start_time: start,
        end_time: end,
        effective_from: None,
        effective_until: None,
        is_active: true,
    }
}

fn exception(
    on: NaiveDate,
    is_available: bool,
    window: Option<(NaiveTime, NaiveTime)>,
) -> DateException {
    DateException {
        staff_id: Uuid::new_v4(),
        exception_date: on,
        is_available,
        start_time: window.map(|(start, _)| start),
        end_time: window.map(|(_, end)| end),
    }
}

fn calendar_with_monday_schedule() -> StaffCalendar {
    StaffCalendar {
        base_schedules: vec![weekday_schedule(1, time(9, 0), time(17, 0))],
        ..StaffCalendar::default()
    }
}

#[test]
fn approved_vacation_overrides_everything() {
    let mut calendar = calendar_with_monday_schedule();
    calendar.vacations.push(VacationPeriod {
        staff_id: Uuid::new_v4(),
        start_date: monday(),
        end_date: date(2025, 6, 13),
        is_approved: true,
    });
    // Even an explicit "available" exception loses to the vacation.
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), true, None));

    assert!(!is_available_at(&calendar, monday(), time(10, 0)));
    assert!(available_windows(&calendar, monday(), &business_hours()).is_empty());
}

#[test]
fn unapproved_vacation_is_ignored() {
    let mut calendar = calendar_with_monday_schedule();
    calendar.vacations.push(VacationPeriod {
        staff_id: Uuid::new_v4(),
        start_date: monday(),
        end_date: date(2025, 6, 13),
        is_approved: false,
    });

    assert!(is_available_at(&calendar, monday(), time(10, 0)));
    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![business_hours()]
    );
}

#[test]
fn all_day_exception_decides_the_whole_day() {
    let mut calendar = calendar_with_monday_schedule();
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), false, None));

    assert!(!is_available_at(&calendar, monday(), time(10, 0)));
    assert!(available_windows(&calendar, monday(), &business_hours()).is_empty());
}

#[test]
fn all_day_available_exception_opens_a_day_without_schedule() {
    // No base schedule at all; the exception alone makes the day available.
    let mut calendar = StaffCalendar::default();
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), true, None));

    assert!(is_available_at(&calendar, monday(), time(12, 0)));
    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![business_hours()]
    );
}

#[test]
fn time_scoped_exception_falls_through_outside_its_window() {
    let mut calendar = calendar_with_monday_schedule();
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), false, Some((time(13, 0), time(15, 0)))));

    // Inside the exception window the override applies.
    assert!(!is_available_at(&calendar, monday(), time(13, 30)));
    // Outside it the base schedule still applies.
    assert!(is_available_at(&calendar, monday(), time(10, 0)));
    assert!(is_available_at(&calendar, monday(), time(15, 0)));

    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![range(9, 0, 13, 0), range(15, 0, 17, 0)]
    );
}

#[test]
fn available_exception_extends_beyond_base_schedule() {
    // Base schedule ends at 12:00; an exception opens the afternoon.
    let mut calendar = StaffCalendar {
        base_schedules: vec![weekday_schedule(1, time(9, 0), time(12, 0))],
        ..StaffCalendar::default()
    };
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), true, Some((time(14, 0), time(16, 0)))));

    assert!(is_available_at(&calendar, monday(), time(15, 0)));
    assert!(!is_available_at(&calendar, monday(), time(13, 0)));
    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![range(9, 0, 12, 0), range(14, 0, 16, 0)]
    );
}

#[test]
fn overlapping_exceptions_first_in_stored_order_wins() {
    let mut calendar = calendar_with_monday_schedule();
    let entry = calendar.exceptions.entry(monday()).or_default();
    entry.push(exception(monday(), false, Some((time(10, 0), time(12, 0)))));
    // Overlaps the first exception; only the uncovered tail applies.
    entry.push(exception(monday(), true, Some((time(11, 0), time(13, 0)))));

    assert!(!is_available_at(&calendar, monday(), time(11, 30)));
    assert!(is_available_at(&calendar, monday(), time(12, 30)));
    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![range(9, 0, 10, 0), range(12, 0, 17, 0)]
    );
}

#[test]
fn split_shifts_match_any_entry() {
    let calendar = StaffCalendar {
        base_schedules: vec![
            weekday_schedule(1, time(9, 0), time(12, 0)),
            weekday_schedule(1, time(14, 0), time(17, 0)),
        ],
        ..StaffCalendar::default()
    };

    assert!(is_available_at(&calendar, monday(), time(10, 0)));
    assert!(!is_available_at(&calendar, monday(), time(13, 0)));
    assert!(is_available_at(&calendar, monday(), time(16, 59)));
    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![range(9, 0, 12, 0), range(14, 0, 17, 0)]
    );
}

#[test]
fn schedule_outside_effective_bounds_does_not_apply() {
    let mut schedule = weekday_schedule(1, time(9, 0), time(17, 0));
    schedule.effective_from = Some(date(2025, 7, 1));
    let calendar = StaffCalendar {
        base_schedules: vec![schedule],
        ..StaffCalendar::default()
    };

    assert!(!is_available_at(&calendar, monday(), time(10, 0)));
    // First Monday inside the effective window.
    assert!(is_available_at(&calendar, date(2025, 7, 7), time(10, 0)));
}

#[test]
fn missing_schedule_for_weekday_means_unavailable() {
    let calendar = calendar_with_monday_schedule();
    // Tuesday has no entry at all.
    let tuesday = date(2025, 6, 10);

    assert!(!is_available_at(&calendar, tuesday, time(10, 0)));
    assert!(available_windows(&calendar, tuesday, &business_hours()).is_empty());
}

#[test]
fn adjacent_windows_are_merged() {
    // Base morning plus an exception opening exactly at noon: one window.
    let mut calendar = StaffCalendar {
        base_schedules: vec![weekday_schedule(1, time(9, 0), time(12, 0))],
        ..StaffCalendar::default()
    };
    calendar
        .exceptions
        .entry(monday())
        .or_default()
        .push(exception(monday(), true, Some((time(12, 0), time(14, 0)))));

    assert_eq!(
        available_windows(&calendar, monday(), &business_hours()),
        vec![range(9, 0, 14, 0)]
    );
}
