// libs/notification-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::NotificationError;
use crate::services::inbox::NotificationInboxService;

fn inbox_error(e: NotificationError) -> AppError {
    match e {
        NotificationError::NotProvider | NotificationError::NotRecipient => {
            AppError::Auth(e.to_string())
        }
        NotificationError::NotFound => AppError::NotFound(e.to_string()),
        NotificationError::DatabaseError(msg) => AppError::Storage(msg),
    }
}

// ==============================================================================
// NOTIFICATION HANDLERS
// ==============================================================================

/// GET / - the provider's inbox, newest first
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let inbox_service = NotificationInboxService::new(&state);

    let notifications = inbox_service.list(user.id).await.map_err(inbox_error)?;

    Ok(Json(json!(notifications)))
}

/// PUT /{notification_id} - mark one notification read
#[axum::debug_handler]
pub async fn read_notification(
    State(state): State<Arc<AppConfig>>,
    Path(notification_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let inbox_service = NotificationInboxService::new(&state);

    let notification = inbox_service
        .mark_read(user.id, notification_id)
        .await
        .map_err(inbox_error)?;

    Ok(Json(json!(notification)))
}
