use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{
    Appointment, AppointmentWithClient, AppointmentWithParties, AppointmentWithProvider,
    NewAppointment, NewNotification, Notification, User,
};

// ============================================================================
// STORAGE INTERFACE
// ============================================================================

/// Errors surfaced by the storage layer. Services translate these into
/// their own domain errors; nothing here maps to HTTP on its own.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness rule rejected the write, e.g. two bookings racing
    /// for the same provider slot.
    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Read access to platform accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError>;

    /// Like `find_by_id`, but only matches accounts with the provider
    /// flag set.
    async fn find_provider(&self, id: Uuid) -> Result<User, StoreError>;

    async fn list_providers(&self) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a booking. Fails with [`StoreError::Conflict`] when the
    /// provider already holds an active appointment at `new.date`.
    async fn insert(&self, new: NewAppointment) -> Result<Appointment, StoreError>;

    /// Active appointment held by a provider at an exact slot, if any.
    async fn find_at_slot(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError>;

    /// A client's active appointments, soonest first, provider profile
    /// embedded.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError>;

    /// One appointment with both parties embedded.
    async fn find_with_parties(&self, id: Uuid) -> Result<AppointmentWithParties, StoreError>;

    /// Stamp `canceled_at` and return the updated row.
    async fn mark_canceled(
        &self,
        id: Uuid,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError>;

    /// Everything booked against a provider inside `[from, to]`,
    /// canceled or not, ordered by date, client profile embedded.
    async fn day_schedule(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AppointmentWithClient>, StoreError>;

    /// Active bookings for a provider inside `[from, to]`, bare rows.
    async fn day_bookings(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, new: NewNotification) -> Result<Notification, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError>;

    /// Latest notifications for a recipient, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Mark one notification read. `user_id` scopes the update to the
    /// recipient; someone else's notification comes back as
    /// [`StoreError::NotFound`].
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, StoreError>;
}
