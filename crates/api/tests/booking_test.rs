mod test_utils;

use pretty_assertions::assert_eq;
use uuid::Uuid;

use detailbook_core::models::slot::BookingValidation;
use detailbook_core::models::staff::StaffMember;
use detailbook_core::scheduling::calendar::AvailabilitySnapshot;
use detailbook_core::scheduling::slots;

use test_utils::{
    booking_settings, date, db_confirmed_appointment, db_service, db_staff_member,
    db_weekday_schedule, time,
};

// The handler resolves the snapshot, then either runs the engine's rule
// checks or fails validation outright when the chosen staff member is not
// on the service's roster. These tests drive that decision directly on an
// in-memory snapshot.

fn snapshot_with_booked_monday() -> (AvailabilitySnapshot, Uuid) {
    let service = db_service(60);
    let service_id = service.id;
    let member = db_staff_member("Dana", service_id);
    let member_id = member.id;

    let snapshot = AvailabilitySnapshot::build(
        service.into(),
        vec![StaffMember::from(member)],
        vec![db_weekday_schedule(member_id, 1).into()],
        vec![],
        vec![],
        vec![db_confirmed_appointment(
            member_id,
            service_id,
            date(2025, 6, 9),
            time(10, 0),
            time(11, 0),
        )
        .try_into()
        .unwrap()],
    );
    (snapshot, member_id)
}

#[test]
fn test_clean_slot_validates() {
    let (snapshot, member_id) = snapshot_with_booked_monday();
    let calendar = snapshot.calendar(member_id).unwrap();
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let validation = slots::validate_booking(
        calendar,
        &snapshot.service,
        date(2025, 6, 9),
        time(11, 0),
        &booking_settings(),
        now,
        None,
    );

    assert!(validation.valid);
    assert!(validation.errors.is_empty());
}

#[test]
fn test_conflicting_slot_fails_validation() {
    let (snapshot, member_id) = snapshot_with_booked_monday();
    let calendar = snapshot.calendar(member_id).unwrap();
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let validation = slots::validate_booking(
        calendar,
        &snapshot.service,
        date(2025, 6, 9),
        time(10, 30),
        &booking_settings(),
        now,
        None,
    );

    assert!(!validation.valid);
    assert!(validation
        .errors
        .iter()
        .any(|e| e.contains("conflicts with an existing appointment")));
}

#[test]
fn test_staff_outside_roster_fails_validation() {
    let (snapshot, _) = snapshot_with_booked_monday();
    let outsider = Uuid::new_v4();

    // The handler reports this without consulting the engine at all.
    let validation = match snapshot.calendar(outsider) {
        Some(_) => panic!("outsider must not have a calendar"),
        None => BookingValidation::failed(vec!["Sam does not offer this service".to_string()]),
    };

    assert!(!validation.valid);
    assert_eq!(validation.errors.len(), 1);
}

#[test]
fn test_reschedule_ignores_own_appointment() {
    let (snapshot, member_id) = snapshot_with_booked_monday();
    let calendar = snapshot.calendar(member_id).unwrap();
    let existing_id = calendar.appointments_on(date(2025, 6, 9))[0].id;
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let validation = slots::validate_booking(
        calendar,
        &snapshot.service,
        date(2025, 6, 9),
        time(10, 0),
        &booking_settings(),
        now,
        Some(existing_id),
    );

    assert!(validation.valid);
}
