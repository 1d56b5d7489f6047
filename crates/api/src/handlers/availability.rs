//! # Availability Handlers
//!
//! Handlers for querying bookable slots: a per-day slot listing for the
//! booking wizard, a per-date category map for the month calendar, and a
//! first-available-staff lookup used when the customer has no preference.
//!
//! ## Query batching
//!
//! Every handler here loads a single `AvailabilitySnapshot` up front: a
//! fixed number of bulk queries (service, eligible roster, base schedules,
//! exceptions, vacations, blocking appointments) regardless of how many
//! days are requested. Everything after that is pure in-memory work:
//!
//! 1. The snapshot loader groups all rows by staff member.
//! 2. For each date, the engine resolves each member's availability
//!    windows (vacation, then exceptions, then the weekly schedule) once.
//! 3. Candidate slots are walked at the configured interval; a slot counts
//!    when at least one member covers it with no conflicting appointment.
//! 4. The calendar endpoint buckets the per-date count into
//!    unavailable / limited / available.
//!
//! No queries are issued inside the per-day loop. An earlier revision
//! fetched schedules and appointments per day; the snapshot path replaced
//! it specifically to keep calendar rendering at a constant query count.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use detailbook_core::errors::BookingError;
use detailbook_core::models::slot::{
    AvailabilityCalendarResponse, DaySlotsResponse, FirstAvailableStaffResponse,
};
use detailbook_core::scheduling::{aggregator, slots};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the per-day slot listing
#[derive(Debug, Deserialize)]
pub struct DaySlotsQuery {
    pub service_id: Uuid,
    pub date: NaiveDate,
}

/// Lists the bookable slots for a service on one date.
///
/// # Endpoint
///
/// `GET /api/availability/slots?service_id=<uuid>&date=2025-06-09`
///
/// # Errors
///
/// * `BookingError::NotFound` - the service does not exist or is inactive
/// * `BookingError::Database` - a bulk fetch failed
pub async fn day_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DaySlotsQuery>,
) -> Result<Json<DaySlotsResponse>, AppError> {
    let snapshot = detailbook_db::snapshot::load_availability_snapshot(
        &state.db_pool,
        query.service_id,
        query.date,
        query.date,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Service with ID {} not found", query.service_id))
    })?;

    let now = Local::now().naive_local();
    let slots = slots::generate_slots(&snapshot, query.date, &state.settings, now);
    debug!(
        "Generated {} slots for service {} on {}",
        slots.len(),
        query.service_id,
        query.date
    );

    Ok(Json(DaySlotsResponse {
        service_id: query.service_id,
        date: query.date,
        slots,
    }))
}

/// Query parameters for the bulk availability calendar
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub service_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Maps every date in a range to unavailable / limited / available.
///
/// # Endpoint
///
/// `GET /api/availability/calendar?service_id=<uuid>&start_date=2025-06-01&end_date=2025-06-30`
///
/// An unknown service is rendered as every date unavailable rather than an
/// error, so the month view stays usable while admin data is in flux. An
/// inverted date range is a client bug and is rejected.
pub async fn availability_calendar(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<AvailabilityCalendarResponse>, AppError> {
    let snapshot = detailbook_db::snapshot::load_availability_snapshot(
        &state.db_pool,
        query.service_id,
        query.start_date,
        query.end_date,
    )
    .await?;

    let now = Local::now().naive_local();
    let days = match snapshot {
        Some(snapshot) => aggregator::bulk_availability(
            &snapshot,
            query.start_date,
            query.end_date,
            &state.settings,
            now,
        )?,
        None => {
            debug!(
                "Unknown service {} requested; rendering range as unavailable",
                query.service_id
            );
            aggregator::unavailable_range(query.start_date, query.end_date)?
        }
    };

    Ok(Json(AvailabilityCalendarResponse {
        service_id: query.service_id,
        days,
    }))
}

/// Query parameters for the first-available-staff lookup
#[derive(Debug, Deserialize)]
pub struct FirstAvailableQuery {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// Finds the first staff member able to take a slot, in roster order.
///
/// # Endpoint
///
/// `GET /api/availability/staff?service_id=<uuid>&date=2025-06-09&start_time=10:00:00`
///
/// Returns `{"staff_id": null}` when nobody can take the slot; the
/// booking flow treats that as "pick a different time", not as an error.
pub async fn first_available_staff(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FirstAvailableQuery>,
) -> Result<Json<FirstAvailableStaffResponse>, AppError> {
    let snapshot = detailbook_db::snapshot::load_availability_snapshot(
        &state.db_pool,
        query.service_id,
        query.date,
        query.date,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Service with ID {} not found", query.service_id))
    })?;

    let now = Local::now().naive_local();
    let staff_id = slots::first_available_staff(
        &snapshot,
        query.date,
        query.start_time,
        &state.settings,
        now,
    );

    Ok(Json(FirstAvailableStaffResponse { staff_id }))
}
