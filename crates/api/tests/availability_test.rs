mod test_utils;

use chrono::NaiveDate;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use detailbook_core::models::appointment::Appointment;
use detailbook_core::models::slot::DayCategory;
use detailbook_core::models::staff::StaffMember;
use detailbook_core::scheduling::{aggregator, calendar::AvailabilitySnapshot, slots};

use detailbook_api::middleware::error_handling::AppError;

use test_utils::{
    booking_settings, date, db_confirmed_appointment, db_service, db_staff_member,
    db_weekday_schedule, time, TestContext,
};

// Mirrors the handler's snapshot-loading phase against the mock
// repositories: one service lookup, one roster query, then bulk fetches
// grouped into the in-memory snapshot.
async fn load_snapshot(
    ctx: &TestContext,
    service_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<AvailabilitySnapshot>, AppError> {
    let Some(service) = ctx.service_repo.get_service_by_id(service_id).await? else {
        return Ok(None);
    };

    let staff: Vec<StaffMember> = ctx
        .staff_repo
        .get_staff_for_service(service_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    if staff.is_empty() {
        return Ok(Some(AvailabilitySnapshot::build(
            service.into(),
            staff,
            vec![],
            vec![],
            vec![],
            vec![],
        )));
    }
    let staff_ids: Vec<Uuid> = staff.iter().map(|member| member.id).collect();

    let schedules = ctx
        .schedule_repo
        .get_base_schedules(staff_ids.clone())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let exceptions = ctx
        .schedule_repo
        .get_exceptions_in_range(staff_ids.clone(), start, end)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let vacations = ctx
        .schedule_repo
        .get_approved_vacations_in_range(staff_ids.clone(), start, end)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let appointments = ctx
        .appointment_repo
        .get_blocking_appointments_in_range(staff_ids, start, end)
        .await?
        .into_iter()
        .map(Appointment::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    Ok(Some(AvailabilitySnapshot::build(
        service.into(),
        staff,
        schedules,
        exceptions,
        vacations,
        appointments,
    )))
}

fn expect_no_overrides(ctx: &mut TestContext) {
    ctx.schedule_repo
        .expect_get_exceptions_in_range()
        .returning(|_, _, _| Ok(vec![]));
    ctx.schedule_repo
        .expect_get_approved_vacations_in_range()
        .returning(|_, _, _| Ok(vec![]));
    ctx.appointment_repo
        .expect_get_blocking_appointments_in_range()
        .returning(|_, _, _| Ok(vec![]));
}

#[tokio::test]
async fn test_unknown_service_yields_no_snapshot() {
    let mut ctx = TestContext::new();
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(|_| Ok(None));

    let result = load_snapshot(&ctx, Uuid::new_v4(), date(2025, 6, 9), date(2025, 6, 9)).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_day_slots_from_mocked_repositories() {
    let mut ctx = TestContext::new();
    let service = db_service(60);
    let service_id = service.id;
    let member = db_staff_member("Dana", service_id);
    let member_id = member.id;

    ctx.service_repo
        .expect_get_service_by_id()
        .with(predicate::eq(service_id))
        .returning(move |_| Ok(Some(service.clone())));
    ctx.staff_repo
        .expect_get_staff_for_service()
        .with(predicate::eq(service_id))
        .returning(move |_| Ok(vec![member.clone()]));
    ctx.schedule_repo
        .expect_get_base_schedules()
        .returning(move |_| Ok(vec![db_weekday_schedule(member_id, 1)]));
    expect_no_overrides(&mut ctx);

    // 2025-06-09 is a Monday; "now" is the Sunday before at 08:00.
    let monday = date(2025, 6, 9);
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let snapshot = load_snapshot(&ctx, service_id, monday, monday)
        .await
        .unwrap()
        .unwrap();
    let slots = slots::generate_slots(&snapshot, monday, &booking_settings(), now);

    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0].start, time(9, 0));
    assert!(slots.iter().all(|slot| slot.available));
}

#[tokio::test]
async fn test_calendar_buckets_from_mocked_repositories() {
    let mut ctx = TestContext::new();
    let service = db_service(60);
    let service_id = service.id;
    let member = db_staff_member("Dana", service_id);
    let member_id = member.id;

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(service.clone())));
    ctx.staff_repo
        .expect_get_staff_for_service()
        .returning(move |_| Ok(vec![member.clone()]));
    // Monday only; the rest of the week has no schedule.
    ctx.schedule_repo
        .expect_get_base_schedules()
        .returning(move |_| Ok(vec![db_weekday_schedule(member_id, 1)]));
    ctx.schedule_repo
        .expect_get_exceptions_in_range()
        .returning(|_, _, _| Ok(vec![]));
    ctx.schedule_repo
        .expect_get_approved_vacations_in_range()
        .returning(|_, _, _| Ok(vec![]));
    // Monday is fully booked from 09:00 to 16:00, leaving one free slot.
    ctx.appointment_repo
        .expect_get_blocking_appointments_in_range()
        .returning(move |_, _, _| {
            Ok(vec![db_confirmed_appointment(
                member_id,
                service_id,
                date(2025, 6, 9),
                time(9, 0),
                time(16, 0),
            )])
        });

    let (start, end) = (date(2025, 6, 9), date(2025, 6, 10));
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let snapshot = load_snapshot(&ctx, service_id, start, end)
        .await
        .unwrap()
        .unwrap();
    let days =
        aggregator::bulk_availability(&snapshot, start, end, &booking_settings(), now).unwrap();

    // One slot left on Monday (16:00) -> limited; Tuesday has no schedule.
    assert_eq!(days[&date(2025, 6, 9)], DayCategory::Limited);
    assert_eq!(days[&date(2025, 6, 10)], DayCategory::Unavailable);
}

#[tokio::test]
async fn test_empty_roster_renders_as_unavailable() {
    let mut ctx = TestContext::new();
    let service = db_service(60);
    let service_id = service.id;

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(service.clone())));
    ctx.staff_repo
        .expect_get_staff_for_service()
        .returning(|_| Ok(vec![]));

    let (start, end) = (date(2025, 6, 9), date(2025, 6, 11));
    let now = date(2025, 6, 8).and_time(time(8, 0));

    let snapshot = load_snapshot(&ctx, service_id, start, end)
        .await
        .unwrap()
        .unwrap();
    let days =
        aggregator::bulk_availability(&snapshot, start, end, &booking_settings(), now).unwrap();

    assert_eq!(days.len(), 3);
    assert!(days.values().all(|c| *c == DayCategory::Unavailable));
}

#[tokio::test]
async fn test_first_available_staff_prefers_roster_order() {
    let mut ctx = TestContext::new();
    let service = db_service(60);
    let service_id = service.id;
    let first = db_staff_member("Alex", service_id);
    let second = db_staff_member("Brook", service_id);
    let (first_id, second_id) = (first.id, second.id);

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(service.clone())));
    ctx.staff_repo
        .expect_get_staff_for_service()
        .returning(move |_| Ok(vec![first.clone(), second.clone()]));
    ctx.schedule_repo
        .expect_get_base_schedules()
        .returning(move |_| {
            Ok(vec![
                db_weekday_schedule(first_id, 1),
                db_weekday_schedule(second_id, 1),
            ])
        });
    ctx.schedule_repo
        .expect_get_exceptions_in_range()
        .returning(|_, _, _| Ok(vec![]));
    ctx.schedule_repo
        .expect_get_approved_vacations_in_range()
        .returning(|_, _, _| Ok(vec![]));
    ctx.appointment_repo
        .expect_get_blocking_appointments_in_range()
        .returning(move |_, _, _| {
            Ok(vec![db_confirmed_appointment(
                first_id,
                service_id,
                date(2025, 6, 9),
                time(10, 0),
                time(11, 0),
            )])
        });

    let monday = date(2025, 6, 9);
    let now = date(2025, 6, 8).and_time(time(8, 0));
    let snapshot = load_snapshot(&ctx, service_id, monday, monday)
        .await
        .unwrap()
        .unwrap();
    let settings = booking_settings();

    assert_eq!(
        slots::first_available_staff(&snapshot, monday, time(11, 0), &settings, now),
        Some(first_id)
    );
    assert_eq!(
        slots::first_available_staff(&snapshot, monday, time(10, 0), &settings, now),
        Some(second_id)
    );
}
