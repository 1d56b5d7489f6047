//! Candidate slot enumeration. The walk starts at opening time and
//! advances by the configured step; a slot is kept when it fits entirely
//! inside business hours and at least one roster member both works the
//! whole span and has no overlapping appointment. Days whose earliest
//! candidate slot misses the advance-booking cutoff produce no slots at
//! all, on this path and on the bulk path alike.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::calendar::{AvailabilitySnapshot, StaffCalendar};
use super::conflict;
use super::interval::TimeRange;
use super::resolver;
use super::settings::BookingSettings;
use crate::models::appointment::Appointment;
use crate::models::service::Service;
use crate::models::slot::{BookingValidation, Slot};

/// Earliest instant a new booking may start.
pub fn booking_cutoff(settings: &BookingSettings, now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::hours(i64::from(settings.advance_booking_hours))
}

/// `time + minutes`, or `None` when the result would cross midnight.
fn advance(time: NaiveTime, minutes: i64) -> Option<NaiveTime> {
    let (next, wrapped) = time.overflowing_add_signed(Duration::minutes(minutes));
    (wrapped == 0).then_some(next)
}

/// Whether the day's earliest candidate slot already misses the cutoff, in
/// which case the whole day is skipped without walking it.
fn day_misses_cutoff(date: NaiveDate, settings: &BookingSettings, now: NaiveDateTime) -> bool {
    date.and_time(settings.business_hours.start) < booking_cutoff(settings, now)
}

/// Enumerate the bookable slots for a service on one date across the whole
/// eligible roster. A slot is emitted when ANY member can take it.
pub fn generate_slots(
    snapshot: &AvailabilitySnapshot,
    date: NaiveDate,
    settings: &BookingSettings,
    now: NaiveDateTime,
) -> Vec<Slot> {
    let duration_minutes = i64::from(snapshot.service.duration_minutes.max(0));
    if duration_minutes == 0 || snapshot.staff.is_empty() {
        return Vec::new();
    }
    if day_misses_cutoff(date, settings, now) {
        return Vec::new();
    }

    let hours = settings.business_hours.range();

    // Resolve each member's windows and day appointments once; the walk
    // below is pure lookups.
    let roster: Vec<(Vec<TimeRange>, &[Appointment])> = snapshot
        .staff
        .iter()
        .filter_map(|member| snapshot.calendar(member.id))
        .map(|calendar| {
            (
                resolver::available_windows(calendar, date, &hours),
                calendar.appointments_on(date),
            )
        })
        .collect();

    let mut slots = Vec::new();
    let mut current = hours.start;
    loop {
        let Some(end) = advance(current, duration_minutes) else {
            break;
        };
        if end > hours.end {
            break;
        }

        let span = TimeRange::new(current, end);
        let bookable = roster.iter().any(|(windows, appointments)| {
            windows.iter().any(|window| window.covers(&span))
                && !conflict::has_conflict(appointments, &span, None)
        });
        if bookable {
            slots.push(Slot {
                start: current,
                end,
                available: true,
            });
        }

        match advance(current, i64::from(settings.slot_interval_minutes)) {
            Some(next) => current = next,
            None => break,
        }
    }

    slots
}

/// Number of bookable slots on a date, as the calendar aggregator counts
/// them.
pub fn count_available_slots(
    snapshot: &AvailabilitySnapshot,
    date: NaiveDate,
    settings: &BookingSettings,
    now: NaiveDateTime,
) -> usize {
    generate_slots(snapshot, date, settings, now).len()
}

/// Single-staff variant of the slot check, used to validate an
/// already-chosen staff and slot combination. The cutoff applies to the
/// proposed start itself here.
pub fn check_staff_availability(
    calendar: &StaffCalendar,
    date: NaiveDate,
    span: &TimeRange,
    settings: &BookingSettings,
    now: NaiveDateTime,
    exclude_appointment: Option<Uuid>,
) -> bool {
    let hours = settings.business_hours.range();
    if !hours.covers(span) {
        return false;
    }
    if date.and_time(span.start) < booking_cutoff(settings, now) {
        return false;
    }
    resolver::available_windows(calendar, date, &hours)
        .iter()
        .any(|window| window.covers(span))
        && !conflict::has_conflict(calendar.appointments_on(date), span, exclude_appointment)
}

/// First roster member able to take the proposed start time, in roster
/// order. `None` when nobody can.
pub fn first_available_staff(
    snapshot: &AvailabilitySnapshot,
    date: NaiveDate,
    start_time: NaiveTime,
    settings: &BookingSettings,
    now: NaiveDateTime,
) -> Option<Uuid> {
    let end = advance(start_time, i64::from(snapshot.service.duration_minutes.max(0)))?;
    let span = TimeRange::new(start_time, end);
    if span.is_empty() {
        return None;
    }

    snapshot
        .staff
        .iter()
        .map(|member| member.id)
        .find(|staff_id| {
            snapshot.calendar(*staff_id).is_some_and(|calendar| {
                check_staff_availability(calendar, date, &span, settings, now, None)
            })
        })
}

/// Validate a proposed booking against every rule, collecting all failures
/// instead of stopping at the first.
pub fn validate_booking(
    calendar: &StaffCalendar,
    service: &Service,
    date: NaiveDate,
    start_time: NaiveTime,
    settings: &BookingSettings,
    now: NaiveDateTime,
    exclude_appointment: Option<Uuid>,
) -> BookingValidation {
    if service.duration_minutes <= 0 {
        return BookingValidation::failed(vec![format!(
            "Service {} has no valid duration",
            service.name
        )]);
    }
    let Some(end) = advance(start_time, i64::from(service.duration_minutes)) else {
        return BookingValidation::failed(vec![
            "Requested time does not fit within a single day".to_string(),
        ]);
    };
    let span = TimeRange::new(start_time, end);
    let hours = settings.business_hours.range();

    let mut errors = Vec::new();
    if !hours.covers(&span) {
        errors.push(format!(
            "Requested time falls outside business hours ({} - {})",
            hours.start, hours.end
        ));
    }
    if date.and_time(start_time) < booking_cutoff(settings, now) {
        errors.push(format!(
            "Bookings require at least {} hours notice",
            settings.advance_booking_hours
        ));
    }
    if !resolver::available_windows(calendar, date, &hours)
        .iter()
        .any(|window| window.covers(&span))
    {
        errors.push("Staff member is not scheduled for the requested time".to_string());
    }
    if conflict::has_conflict(calendar.appointments_on(date), &span, exclude_appointment) {
        errors.push("Requested time conflicts with an existing appointment".to_string());
    }

    if errors.is_empty() {
        BookingValidation::ok()
    } else {
        BookingValidation::failed(errors)
    }
}
