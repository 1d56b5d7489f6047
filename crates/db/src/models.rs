use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use detailbook_core::models::appointment::Appointment;
use detailbook_core::models::service::Service;
use detailbook_core::models::staff::{BaseSchedule, DateException, StaffMember, VacationPeriod};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Self {
            id: row.id,
            name: row.name,
            duration_minutes: row.duration_minutes,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaffMember {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Aggregated from the staff_services join table.
    pub service_ids: Vec<Uuid>,
}

impl From<DbStaffMember> for StaffMember {
    fn from(row: DbStaffMember) -> Self {
        Self {
            id: row.id,
            name: row.name,
            service_ids: row.service_ids,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaffSchedule {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub effective_from: Option<NaiveDate>,
    pub effective_until: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbStaffSchedule> for BaseSchedule {
    fn from(row: DbStaffSchedule) -> Self {
        Self {
            staff_id: row.staff_id,
            day_of_week: row.day_of_week.clamp(0, 6) as u8,
            start_time: row.start_time,
            end_time: row.end_time,
            effective_from: row.effective_from,
            effective_until: row.effective_until,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleException {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub exception_date: NaiveDate,
    pub is_available: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl From<DbScheduleException> for DateException {
    fn from(row: DbScheduleException) -> Self {
        Self {
            staff_id: row.staff_id,
            exception_date: row.exception_date,
            is_available: row.is_available,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVacation {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbVacation> for VacationPeriod {
    fn from(row: DbVacation) -> Self {
        Self {
            staff_id: row.staff_id,
            start_date: row.start_date,
            end_date: row.end_date,
            is_approved: row.is_approved,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: String| eyre!("Appointment {}: {e}", row.id))?;
        Ok(Self {
            id: row.id,
            staff_id: row.staff_id,
            service_id: row.service_id,
            date: row.appointment_date,
            start_time: row.start_time,
            end_time: row.end_time,
            status,
        })
    }
}
