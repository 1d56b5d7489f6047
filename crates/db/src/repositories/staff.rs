use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbStaffMember;

/// The active staff members qualified for a service, with all their
/// service links aggregated, in stable name order. The ordering is what
/// makes first-available-staff resolution deterministic.
pub async fn get_staff_for_service(
    pool: &Pool<Postgres>,
    service_id: Uuid,
) -> Result<Vec<DbStaffMember>> {
    tracing::debug!("Getting eligible staff for service: {}", service_id);

    let staff = sqlx::query_as::<_, DbStaffMember>(
        r#"
        SELECT s.id, s.name, s.email, s.is_active, s.created_at,
               array_agg(ss.service_id) AS service_ids
        FROM staff_members s
        JOIN staff_services ss ON ss.staff_id = s.id
        WHERE s.is_active = TRUE
          AND EXISTS (
              SELECT 1 FROM staff_services q
              WHERE q.staff_id = s.id AND q.service_id = $1
          )
        GROUP BY s.id, s.name, s.email, s.is_active, s.created_at
        ORDER BY s.name ASC, s.id ASC
        "#,
    )
    .bind(service_id)
    .fetch_all(pool)
    .await?;

    Ok(staff)
}

pub async fn get_staff_member_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbStaffMember>> {
    tracing::debug!("Getting staff member by id: {}", id);

    let staff = sqlx::query_as::<_, DbStaffMember>(
        r#"
        SELECT s.id, s.name, s.email, s.is_active, s.created_at,
               COALESCE(array_agg(ss.service_id) FILTER (WHERE ss.service_id IS NOT NULL), '{}') AS service_ids
        FROM staff_members s
        LEFT JOIN staff_services ss ON ss.staff_id = s.id
        WHERE s.id = $1
        GROUP BY s.id, s.name, s.email, s.is_active, s.created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(staff)
}
