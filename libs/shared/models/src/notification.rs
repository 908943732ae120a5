use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// NOTIFICATION MODELS
// ============================================================================

/// In-app notice shown to a provider when a slot of theirs is booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub content: String,
    pub user_id: Uuid,
}
