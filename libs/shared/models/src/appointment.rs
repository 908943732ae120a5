use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{Party, PublicProfile};

// ============================================================================
// APPOINTMENT MODELS
// ============================================================================

/// Cancellations are allowed up to this many hours before the slot.
pub const CANCEL_WINDOW_HOURS: i64 = 2;

/// One booked slot, exactly as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub user_id: Uuid,
    pub provider_id: Uuid,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }

    /// The slot's start time has already gone by.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    /// Still inside the cancellation window: at least
    /// [`CANCEL_WINDOW_HOURS`] before the slot, and not yet canceled.
    pub fn is_cancelable(&self, now: DateTime<Utc>) -> bool {
        !self.is_canceled() && now <= self.date - Duration::hours(CANCEL_WINDOW_HOURS)
    }
}

/// Insert payload for a new booking. `date` is already truncated to the
/// hour by the time it reaches storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: DateTime<Utc>,
    pub user_id: Uuid,
    pub provider_id: Uuid,
}

/// Appointment joined with the provider's public profile, as returned
/// by the client-facing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentWithProvider {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub provider: PublicProfile,
}

/// Appointment joined with the booking client, as returned by the
/// provider's day schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentWithClient {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub user: PublicProfile,
}

/// Appointment joined with both sides, needed when a cancellation has
/// to notify the provider about the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentWithParties {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub provider: Party,
    pub user: Party,
}
