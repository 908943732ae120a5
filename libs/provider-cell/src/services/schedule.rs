// libs/provider-cell/src/services/schedule.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_storage::{AppointmentStore, StoreError, SupabaseStore, UserStore};
use shared_utils::time::day_bounds;

use crate::models::{ProviderError, ScheduleEntry};

// ==============================================================================
// DAY SCHEDULE
// ==============================================================================

pub struct ProviderScheduleService {
    users: Arc<dyn UserStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl ProviderScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(SupabaseStore::new(config));
        Self {
            users: store.clone(),
            appointments: store,
        }
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        appointments: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self {
            users,
            appointments,
        }
    }

    /// Everything booked against the requester for one calendar day,
    /// ascending, canceled rows included. Only providers hold a
    /// schedule, so anyone else is turned away.
    pub async fn day_schedule(
        &self,
        requesting_user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Vec<ScheduleEntry>, ProviderError> {
        self.users
            .find_provider(requesting_user_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => ProviderError::NotProvider,
                other => ProviderError::DatabaseError(other.to_string()),
            })?;

        let (from, to) = day_bounds(date);
        debug!(
            "Loading schedule for provider {} between {} and {}",
            requesting_user_id, from, to
        );

        let rows = self
            .appointments
            .day_schedule(requesting_user_id, from, to)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ScheduleEntry::from_row).collect())
    }
}
