//! Bulk snapshot loading: the fetch phase of the availability calendar.
//! One call issues a fixed number of queries regardless of the date range
//! length (service, eligible roster, base schedules, exceptions,
//! vacations, blocking appointments) and hands the engine a pre-grouped
//! in-memory snapshot, so the per-day loop never touches the pool.

use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use detailbook_core::models::appointment::Appointment;
use detailbook_core::models::staff::StaffMember;
use detailbook_core::scheduling::calendar::AvailabilitySnapshot;

use crate::repositories::{appointment, schedule, service, staff};

/// Load everything needed to answer availability questions for `service_id`
/// over `[start, end]`. Returns `None` when the service does not exist or
/// is inactive; an eligible-but-empty roster still yields a snapshot (the
/// engine renders it as fully unavailable).
pub async fn load_availability_snapshot(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<AvailabilitySnapshot>> {
    let Some(service) = service::get_service_by_id(pool, service_id).await? else {
        return Ok(None);
    };

    let staff: Vec<StaffMember> = staff::get_staff_for_service(pool, service_id)
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

    let base_schedules = schedule::get_base_schedules(pool, &staff_ids)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let exceptions = schedule::get_exceptions_in_range(pool, &staff_ids, start, end)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let vacations = schedule::get_approved_vacations_in_range(pool, &staff_ids, start, end)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let appointments = appointment::get_blocking_appointments_in_range(pool, &staff_ids, start, end)
        .await?
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(AvailabilitySnapshot::build(
        service.into(),
        staff,
        base_schedules,
        exceptions,
        vacations,
        appointments,
    )))
}
