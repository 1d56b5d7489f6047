//! # Booking Handlers
//!
//! Validation and creation of bookings. Validation failures (outside
//! business hours, too little notice, staff not scheduled, slot conflict)
//! are expected outcomes and come back as a structured
//! `{valid, errors}` payload, not as HTTP errors. Creation re-runs the
//! same validation and then re-checks conflicts inside the insert
//! transaction, because the read-side availability check can race with a
//! concurrent booking.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use detailbook_core::errors::BookingError;
use detailbook_core::models::appointment::{
    Appointment, AppointmentResponse, AppointmentStatus, CreateBookingRequest,
    CreateBookingResponse, ValidateBookingRequest,
};
use detailbook_core::models::slot::BookingValidation;
use detailbook_core::scheduling::calendar::AvailabilitySnapshot;
use detailbook_core::scheduling::slots;
use detailbook_db::repositories::appointment::NewAppointment;

use crate::{middleware::error_handling::AppError, ApiState};

/// Validates a proposed booking without creating anything.
///
/// # Endpoint
///
/// `POST /api/bookings/validate`
///
/// # Errors
///
/// * `BookingError::NotFound` - the referenced service or staff member
///   does not exist; rule failures are returned in the payload instead
pub async fn validate_booking(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ValidateBookingRequest>,
) -> Result<Json<BookingValidation>, AppError> {
    let (_, validation) = run_validation(
        &state,
        request.service_id,
        request.staff_id,
        request.date,
        request.start_time,
        request.exclude_appointment_id,
    )
    .await?;

    Ok(Json(validation))
}

/// Creates a pending booking after validating it.
///
/// # Endpoint
///
/// `POST /api/bookings`
///
/// The response always carries the validation outcome. When validation
/// passes but another booking wins the slot between the availability read
/// and the insert, the transactional re-check fails the request with a
/// dedicated validation error rather than double-booking the staff member.
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let (snapshot, validation) = run_validation(
        &state,
        request.service_id,
        request.staff_id,
        request.date,
        request.start_time,
        None,
    )
    .await?;

    if !validation.valid {
        debug!(
            "Rejected booking for staff {} on {}: {:?}",
            request.staff_id, request.date, validation.errors
        );
        return Ok(Json(CreateBookingResponse {
            validation,
            appointment: None,
        }));
    }

    let duration = Duration::minutes(i64::from(snapshot.service.duration_minutes));
    let end_time = request.start_time + duration;

    let created = detailbook_db::repositories::appointment::create_appointment_checked(
        &state.db_pool,
        NewAppointment {
            staff_id: request.staff_id,
            service_id: request.service_id,
            date: request.date,
            start_time: request.start_time,
            end_time,
            customer_name: &request.customer_name,
            customer_phone: request.customer_phone.as_deref(),
            customer_email: request.customer_email.as_deref(),
        },
    )
    .await?;

    match created {
        Some(row) => {
            let appointment = Appointment::try_from(row).map_err(BookingError::Database)?;
            info!(
                "Created appointment {} for staff {} on {}",
                appointment.id, appointment.staff_id, appointment.date
            );
            Ok(Json(CreateBookingResponse {
                validation: BookingValidation::ok(),
                appointment: Some(AppointmentResponse::from(appointment)),
            }))
        }
        None => Ok(Json(CreateBookingResponse {
            validation: BookingValidation::failed(vec![
                "The requested slot was booked by someone else".to_string(),
            ]),
            appointment: None,
        })),
    }
}

/// Fetches one booking by id.
///
/// # Endpoint
///
/// `GET /api/bookings/:id`
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let row = detailbook_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;

    let appointment = Appointment::try_from(row).map_err(BookingError::Database)?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Updates a booking's status (confirm, cancel, complete).
///
/// # Endpoint
///
/// `PUT /api/bookings/:id/status`
///
/// Cancelled and completed bookings stop blocking their slot, so this is
/// also how capacity is released.
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let status: AppointmentStatus = request
        .status
        .parse()
        .map_err(BookingError::Validation)?;

    let row = detailbook_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        status.as_str(),
    )
    .await?
    .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;

    let appointment = Appointment::try_from(row).map_err(BookingError::Database)?;
    info!("Updated appointment {} status to {}", id, status.as_str());
    Ok(Json(AppointmentResponse::from(appointment)))
}

/// Shared validation path: resolves the service snapshot and staff member,
/// then runs the engine's rule checks. Unknown service or staff are
/// `NotFound` errors; an eligible-but-unqualified staff member is a
/// validation failure.
async fn run_validation(
    state: &ApiState,
    service_id: Uuid,
    staff_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    exclude_appointment_id: Option<Uuid>,
) -> Result<(AvailabilitySnapshot, BookingValidation), AppError> {
    let snapshot =
        detailbook_db::snapshot::load_availability_snapshot(&state.db_pool, service_id, date, date)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {service_id} not found"))
            })?;

    let staff = detailbook_db::repositories::staff::get_staff_member_by_id(&state.db_pool, staff_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Staff member with ID {staff_id} not found"))
        })?;

    let now = Local::now().naive_local();
    let validation = match snapshot.calendar(staff_id) {
        Some(calendar) => slots::validate_booking(
            calendar,
            &snapshot.service,
            date,
            start_time,
            &state.settings,
            now,
            exclude_appointment_id,
        ),
        None => BookingValidation::failed(vec![format!(
            "{} does not offer this service",
            staff.name
        )]),
    };

    Ok((snapshot, validation))
}
