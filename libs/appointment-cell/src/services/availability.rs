// libs/appointment-cell/src/services/availability.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_storage::{AppointmentStore, StoreError, SupabaseStore, UserStore};
use shared_utils::time::start_of_hour;

use crate::models::AppointmentError;

// ==============================================================================
// SLOT AVAILABILITY
// ==============================================================================

/// Gatekeeper for new bookings. Every booking request passes through
/// [`ensure_bookable`](SlotAvailabilityService::ensure_bookable) before
/// anything is written.
pub struct SlotAvailabilityService {
    users: Arc<dyn UserStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl SlotAvailabilityService {
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

    /// Validates a booking request against the slot rules and returns
    /// the hour-aligned date the appointment must be stored under.
    ///
    /// Rules, in order: the target must be a provider, a user cannot
    /// book themselves, the slot (truncated to the hour) must not be in
    /// the past, and the provider must not already hold an active
    /// appointment at that slot.
    pub async fn ensure_bookable(
        &self,
        provider_id: Uuid,
        requesting_user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppointmentError> {
        let provider = self
            .users
            .find_provider(provider_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppointmentError::InvalidProvider,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        if provider.id == requesting_user_id {
            return Err(AppointmentError::SelfBooking);
        }

        let hour_start = start_of_hour(date);
        debug!(
            "Checking slot {} for provider {}",
            hour_start, provider_id
        );

        if hour_start < Utc::now() {
            return Err(AppointmentError::PastDate);
        }

        let taken = self
            .appointments
            .find_at_slot(provider_id, hour_start)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        if taken.is_some() {
            return Err(AppointmentError::SlotUnavailable);
        }

        Ok(hour_start)
    }
}
