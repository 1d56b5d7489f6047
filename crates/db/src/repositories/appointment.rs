use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbAppointment;

/// Pending and confirmed appointments for a set of staff members inside a
/// date range, in one round trip. Cancelled and completed rows are not
/// fetched at all since they never block a slot.
pub async fn get_blocking_appointments_in_range(
    pool: &Pool<Postgres>,
    staff_ids: &[Uuid],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    tracing::debug!("Getting blocking appointments between {} and {}", start, end);

    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, staff_id, service_id, customer_name, customer_phone, customer_email,
               appointment_date, start_time, end_time, status, created_at
        FROM appointments
        WHERE staff_id = ANY($1)
          AND appointment_date BETWEEN $2 AND $3
          AND status IN ('pending', 'confirmed')
        ORDER BY appointment_date, start_time
        "#,
    )
    .bind(staff_ids)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, staff_id, service_id, customer_name, customer_phone, customer_email,
               appointment_date, start_time, end_time, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub struct NewAppointment<'a> {
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub customer_name: &'a str,
    pub customer_phone: Option<&'a str>,
    pub customer_email: Option<&'a str>,
}

/// Insert a pending appointment, re-checking for an overlapping blocking
/// appointment inside the same transaction. The availability check the
/// caller ran is advisory and can race with a concurrent booking; this is
/// the authoritative check at write time. Returns `None` when a
/// conflicting row won the race.
pub async fn create_appointment_checked(
    pool: &Pool<Postgres>,
    new: NewAppointment<'_>,
) -> Result<Option<DbAppointment>> {
    let id = Uuid::new_v4();
    tracing::debug!(
        "Creating appointment: id={}, staff={}, date={}, start={}",
        id,
        new.staff_id,
        new.date,
        new.start_time
    );

    let mut tx = pool.begin().await?;

    let conflicting = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM appointments
            WHERE staff_id = $1
              AND appointment_date = $2
              AND status IN ('pending', 'confirmed')
              AND start_time < $4
              AND end_time > $3
        )
        "#,
    )
    .bind(new.staff_id)
    .bind(new.date)
    .bind(new.start_time)
    .bind(new.end_time)
    .fetch_one(&mut *tx)
    .await?;

    if conflicting {
        tx.rollback().await?;
        tracing::debug!("Appointment creation lost the slot race: staff={}", new.staff_id);
        return Ok(None);
    }

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (
            id, staff_id, service_id, customer_name, customer_phone, customer_email,
            appointment_date, start_time, end_time, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
        RETURNING id, staff_id, service_id, customer_name, customer_phone, customer_email,
                  appointment_date, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(new.staff_id)
    .bind(new.service_id)
    .bind(new.customer_name)
    .bind(new.customer_phone)
    .bind(new.customer_email)
    .bind(new.date)
    .bind(new.start_time)
    .bind(new.end_time)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(appointment))
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Updating appointment {} status to {}", id, status);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, staff_id, service_id, customer_name, customer_phone, customer_email,
                  appointment_date, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
