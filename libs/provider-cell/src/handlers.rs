// libs/provider-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_utils::time::parse_iso_date;

use crate::models::{AvailabilityQuery, ProviderError, ScheduleQuery};
use crate::services::availability::DayAvailabilityService;
use crate::services::directory::ProviderDirectoryService;
use crate::services::schedule::ProviderScheduleService;

fn provider_error(e: ProviderError) -> AppError {
    match e {
        ProviderError::NotProvider => AppError::Auth(e.to_string()),
        ProviderError::DatabaseError(msg) => AppError::Storage(msg),
    }
}

// ==============================================================================
// PROVIDER HANDLERS
// ==============================================================================

/// GET / - directory of every account offering slots
#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<AppConfig>>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let directory_service = ProviderDirectoryService::new(&state);

    let providers = directory_service.list().await.map_err(provider_error)?;

    Ok(Json(json!(providers)))
}

/// GET /{provider_id}/available - hour grid for one provider's day
#[axum::debug_handler]
pub async fn provider_day_availability(
    State(state): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
    Extension(_user): Extension<AuthUser>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let date = parse_iso_date(&query.date)
        .ok_or_else(|| AppError::Validation("Invalid date".to_string()))?;

    let availability_service = DayAvailabilityService::new(&state);

    let grid = availability_service
        .day_grid(provider_id, date)
        .await
        .map_err(provider_error)?;

    Ok(Json(json!(grid)))
}

/// GET / - the caller's own day schedule; providers only
#[axum::debug_handler]
pub async fn provider_schedule(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let date = parse_iso_date(&query.date)
        .ok_or_else(|| AppError::Validation("Invalid date".to_string()))?;

    let schedule_service = ProviderScheduleService::new(&state);

    let entries = schedule_service
        .day_schedule(user.id, date)
        .await
        .map_err(provider_error)?;

    Ok(Json(json!(entries)))
}
