use uuid::Uuid;

use super::interval::TimeRange;
use crate::models::appointment::Appointment;

/// True when a slot-blocking appointment overlaps the proposed range.
/// Overlap is boundary-exclusive: an appointment ending at 10:00 does not
/// conflict with a slot starting at 10:00. `exclude_id` skips one
/// appointment, for reschedule flows where the booking being edited must
/// not conflict with itself.
pub fn has_conflict(
    appointments: &[Appointment],
    proposed: &TimeRange,
    exclude_id: Option<Uuid>,
) -> bool {
    appointments.iter().any(|appointment| {
        if Some(appointment.id) == exclude_id || !appointment.status.blocks_slot() {
            return false;
        }
        appointment.time_range().overlaps(proposed)
    })
}
