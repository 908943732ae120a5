// libs/notification-cell/src/services/inbox.rs
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::Notification;
use shared_storage::{NotificationStore, StoreError, SupabaseStore, UserStore};

use crate::models::NotificationError;

/// The inbox shows the most recent notifications only; older ones age
/// out of view.
pub const INBOX_SIZE: i64 = 20;

// ==============================================================================
// NOTIFICATION INBOX
// ==============================================================================

pub struct NotificationInboxService {
    users: Arc<dyn UserStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationInboxService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(SupabaseStore::new(config));
        Self {
            users: store.clone(),
            notifications: store,
        }
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            users,
            notifications,
        }
    }

    /// The requester's inbox, newest first. Only providers receive
    /// booking notifications, so only providers may read them.
    pub async fn list(&self, requesting_user_id: Uuid) -> Result<Vec<Notification>, NotificationError> {
        self.users
            .find_provider(requesting_user_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => NotificationError::NotProvider,
                other => NotificationError::DatabaseError(other.to_string()),
            })?;

        self.notifications
            .list_for_user(requesting_user_id, INBOX_SIZE)
            .await
            .map_err(|e| NotificationError::DatabaseError(e.to_string()))
    }

    /// Flags one of the requester's notifications as read and returns
    /// the updated row.
    pub async fn mark_read(
        &self,
        requesting_user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification, NotificationError> {
        let notification = self
            .notifications
            .find_by_id(notification_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => NotificationError::NotFound,
                other => NotificationError::DatabaseError(other.to_string()),
            })?;

        if notification.user_id != requesting_user_id {
            return Err(NotificationError::NotRecipient);
        }

        debug!(
            "Marking notification {} read for user {}",
            notification_id, requesting_user_id
        );

        self.notifications
            .mark_read(notification_id, requesting_user_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => NotificationError::NotFound,
                other => NotificationError::DatabaseError(other.to_string()),
            })
    }
}
