use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbScheduleException, DbService, DbStaffMember, DbStaffSchedule, DbVacation,
};

// Mock repositories for testing
mock! {
    pub ServiceRepo {
        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn list_active_services(&self) -> eyre::Result<Vec<DbService>>;
    }
}

mock! {
    pub StaffRepo {
        pub async fn get_staff_for_service(
            &self,
            service_id: Uuid,
        ) -> eyre::Result<Vec<DbStaffMember>>;

        pub async fn get_staff_member_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbStaffMember>>;
    }
}

mock! {
    pub ScheduleRepo {
        pub async fn get_base_schedules(
            &self,
            staff_ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<DbStaffSchedule>>;

        pub async fn get_exceptions_in_range(
            &self,
            staff_ids: Vec<Uuid>,
            start: NaiveDate,
            end: NaiveDate,
        ) -> eyre::Result<Vec<DbScheduleException>>;

        pub async fn get_approved_vacations_in_range(
            &self,
            staff_ids: Vec<Uuid>,
            start: NaiveDate,
            end: NaiveDate,
        ) -> eyre::Result<Vec<DbVacation>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn get_blocking_appointments_in_range(
            &self,
            staff_ids: Vec<Uuid>,
            start: NaiveDate,
            end: NaiveDate,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn create_appointment(
            &self,
            staff_id: Uuid,
            service_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<Option<DbAppointment>>;
    }
}
