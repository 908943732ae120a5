// libs/notification-cell/src/models.rs
use thiserror::Error;

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("User is not a provider")]
    NotProvider,

    #[error("Notification not found")]
    NotFound,

    #[error("You don't have permission to update this notification")]
    NotRecipient,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
