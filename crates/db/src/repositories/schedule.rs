use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbScheduleException, DbStaffSchedule, DbVacation};

/// Active recurring schedule entries for a set of staff members, fetched
/// in one round trip.
pub async fn get_base_schedules(
    pool: &Pool<Postgres>,
    staff_ids: &[Uuid],
) -> Result<Vec<DbStaffSchedule>> {
    tracing::debug!("Getting base schedules for {} staff members", staff_ids.len());

    let schedules = sqlx::query_as::<_, DbStaffSchedule>(
        r#"
        SELECT id, staff_id, day_of_week, start_time, end_time,
               effective_from, effective_until, is_active, created_at
        FROM staff_schedules
        WHERE staff_id = ANY($1) AND is_active = TRUE
        ORDER BY staff_id, day_of_week, start_time
        "#,
    )
    .bind(staff_ids)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Date exceptions for a set of staff members inside a date range.
/// Ordered by creation time within each date; the resolver treats the
/// first matching exception as authoritative, so this ordering is part of
/// the contract.
pub async fn get_exceptions_in_range(
    pool: &Pool<Postgres>,
    staff_ids: &[Uuid],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbScheduleException>> {
    tracing::debug!("Getting schedule exceptions between {} and {}", start, end);

    let exceptions = sqlx::query_as::<_, DbScheduleException>(
        r#"
        SELECT id, staff_id, exception_date, is_available, start_time, end_time, created_at
        FROM schedule_exceptions
        WHERE staff_id = ANY($1) AND exception_date BETWEEN $2 AND $3
        ORDER BY exception_date, created_at
        "#,
    )
    .bind(staff_ids)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(exceptions)
}

/// Approved vacation periods overlapping a date range.
pub async fn get_approved_vacations_in_range(
    pool: &Pool<Postgres>,
    staff_ids: &[Uuid],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbVacation>> {
    tracing::debug!("Getting approved vacations between {} and {}", start, end);

    let vacations = sqlx::query_as::<_, DbVacation>(
        r#"
        SELECT id, staff_id, start_date, end_date, is_approved, created_at
        FROM vacations
        WHERE staff_id = ANY($1)
          AND is_approved = TRUE
          AND start_date <= $3
          AND end_date >= $2
        ORDER BY start_date
        "#,
    )
    .bind(staff_ids)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(vacations)
}
