// libs/appointment-cell/src/handlers.rs
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

use crate::models::{AppointmentError, BookAppointmentRequest, ListAppointmentsQuery};
use crate::services::booking::AppointmentBookingService;
use crate::services::lifecycle::AppointmentLifecycleService;

fn rule_violation(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::InvalidProvider
        | AppointmentError::SelfBooking
        | AppointmentError::PastDate
        | AppointmentError::SlotUnavailable => AppError::BadRequest(e.to_string()),
        AppointmentError::NotFound => AppError::NotFound(e.to_string()),
        AppointmentError::NotOwner | AppointmentError::CancelWindowClosed => {
            AppError::Auth(e.to_string())
        }
        AppointmentError::DatabaseError(msg) => AppError::Storage(msg),
    }
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

/// GET / - page of the caller's active appointments, soonest first
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service
        .list(user.id, query.page)
        .await
        .map_err(rule_violation)?;

    Ok(Json(json!(appointments)))
}

/// POST / - book an hour slot with a provider
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .create(user.id, request)
        .await
        .map_err(rule_violation)?;

    Ok(Json(json!(appointment)))
}

/// DELETE /{appointment_id} - cancel a booking inside the allowed window
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let lifecycle_service = AppointmentLifecycleService::new(&state);

    let canceled = lifecycle_service
        .cancel(user.id, appointment_id)
        .await
        .map_err(rule_violation)?;

    Ok(Json(json!(canceled)))
}
