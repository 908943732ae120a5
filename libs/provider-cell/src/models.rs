// libs/provider-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppointmentWithClient, PublicProfile};

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleQuery {
    pub date: String,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// One hour of a provider's day grid. `value` is the slot instant,
/// `time` its wall-clock label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourSlot {
    pub time: String,
    pub value: DateTime<Utc>,
    pub available: bool,
}

/// One row of a provider's day schedule. Canceled bookings stay in the
/// schedule so the provider sees slots that were freed up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub user: PublicProfile,
}

impl ScheduleEntry {
    pub fn from_row(row: AppointmentWithClient) -> Self {
        Self {
            id: row.appointment.id,
            date: row.appointment.date,
            user: row.user,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("User is not a provider")]
    NotProvider,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
