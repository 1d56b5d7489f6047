use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::appointment::Appointment;
use crate::models::service::Service;
use crate::models::staff::{BaseSchedule, DateException, StaffMember, VacationPeriod};

/// One staff member's layered scheduling rules, grouped by date for
/// in-memory resolution. Exceptions and appointments keep the order they
/// were fetched in; exception order is significant (first match wins).
#[derive(Debug, Clone, Default)]
pub struct StaffCalendar {
    pub base_schedules: Vec<BaseSchedule>,
    pub exceptions: HashMap<NaiveDate, Vec<DateException>>,
    pub vacations: Vec<VacationPeriod>,
    pub appointments: HashMap<NaiveDate, Vec<Appointment>>,
}

impl StaffCalendar {
    pub fn exceptions_on(&self, date: NaiveDate) -> &[DateException] {
        self.exceptions.get(&date).map_or(&[], Vec::as_slice)
    }

    pub fn appointments_on(&self, date: NaiveDate) -> &[Appointment] {
        self.appointments.get(&date).map_or(&[], Vec::as_slice)
    }

    pub fn on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|vacation| vacation.covers(date))
    }
}

/// Everything the engine needs to answer availability questions for one
/// service over a date range: the eligible roster plus each member's
/// calendar, assembled once from bulk-fetched collections. The per-day
/// computations read this snapshot and issue no further queries.
#[derive(Debug, Clone)]
pub struct AvailabilitySnapshot {
    pub service: Service,
    /// Eligible roster in lookup order; first-available-staff resolution
    /// follows this order.
    pub staff: Vec<StaffMember>,
    calendars: HashMap<Uuid, StaffCalendar>,
}

impl AvailabilitySnapshot {
    /// Group flat collections by staff member. Rows referencing staff
    /// outside the roster are ignored.
    pub fn build(
        service: Service,
        staff: Vec<StaffMember>,
        base_schedules: Vec<BaseSchedule>,
        exceptions: Vec<DateException>,
        vacations: Vec<VacationPeriod>,
        appointments: Vec<Appointment>,
    ) -> Self {
        let mut calendars: HashMap<Uuid, StaffCalendar> = staff
            .iter()
            .map(|member| (member.id, StaffCalendar::default()))
            .collect();

        for schedule in base_schedules {
            if let Some(calendar) = calendars.get_mut(&schedule.staff_id) {
                calendar.base_schedules.push(schedule);
            }
        }
        for exception in exceptions {
            if let Some(calendar) = calendars.get_mut(&exception.staff_id) {
                calendar
                    .exceptions
                    .entry(exception.exception_date)
                    .or_default()
                    .push(exception);
            }
        }
        for vacation in vacations {
            if let Some(calendar) = calendars.get_mut(&vacation.staff_id) {
                calendar.vacations.push(vacation);
            }
        }
        for appointment in appointments {
            if let Some(calendar) = calendars.get_mut(&appointment.staff_id) {
                calendar
                    .appointments
                    .entry(appointment.date)
                    .or_default()
                    .push(appointment);
            }
        }

        Self {
            service,
            staff,
            calendars,
        }
    }

    pub fn calendar(&self, staff_id: Uuid) -> Option<&StaffCalendar> {
        self.calendars.get(&staff_id)
    }
}
