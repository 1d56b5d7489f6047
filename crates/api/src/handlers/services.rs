use axum::{extract::State, Json};
use std::sync::Arc;

use detailbook_core::models::service::Service;

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists the active services customers can book. The wizard's first step.
///
/// # Endpoint
///
/// `GET /api/services`
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = detailbook_db::repositories::service::list_active_services(&state.db_pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(services))
}
