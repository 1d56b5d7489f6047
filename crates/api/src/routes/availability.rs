use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/slots",
            get(handlers::availability::day_slots),
        )
        .route(
            "/api/availability/calendar",
            get(handlers::availability::availability_calendar),
        )
        .route(
            "/api/availability/staff",
            get(handlers::availability::first_available_staff),
        )
}
