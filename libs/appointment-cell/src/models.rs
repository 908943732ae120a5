// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{
    Appointment, AppointmentWithParties, AppointmentWithProvider, Party, PublicProfile,
};

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub provider_id: Uuid,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListAppointmentsQuery {
    pub page: Option<i64>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// A booking as returned to the client who made it. `past` and
/// `cancelable` are computed against the clock at response time, never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub past: bool,
    pub cancelable: bool,
}

impl AppointmentResponse {
    pub fn from_record(appointment: Appointment, now: DateTime<Utc>) -> Self {
        let past = appointment.is_past(now);
        let cancelable = appointment.is_cancelable(now);
        Self {
            appointment,
            past,
            cancelable,
        }
    }
}

/// One row of the client's paged listing, provider profile embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub past: bool,
    pub cancelable: bool,
    pub provider: PublicProfile,
}

impl AppointmentListEntry {
    pub fn from_row(row: AppointmentWithProvider, now: DateTime<Utc>) -> Self {
        Self {
            id: row.appointment.id,
            date: row.appointment.date,
            past: row.appointment.is_past(now),
            cancelable: row.appointment.is_cancelable(now),
            provider: row.provider,
        }
    }
}

/// The cancellation endpoint returns the full row with both parties so
/// the caller sees exactly what the cancellation mail will describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanceledAppointmentResponse {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub past: bool,
    pub cancelable: bool,
    pub provider: Party,
    pub user: Party,
}

impl CanceledAppointmentResponse {
    pub fn from_row(row: AppointmentWithParties, now: DateTime<Utc>) -> Self {
        let past = row.appointment.is_past(now);
        let cancelable = row.appointment.is_cancelable(now);
        Self {
            appointment: row.appointment,
            past,
            cancelable,
            provider: row.provider,
            user: row.user,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("You can only create appointments with providers")]
    InvalidProvider,

    #[error("You can't create an appointment with yourself")]
    SelfBooking,

    #[error("Past dates are not permitted")]
    PastDate,

    #[error("Appointment date is not available")]
    SlotUnavailable,

    #[error("Appointment not found")]
    NotFound,

    #[error("You don't have permission to cancel this appointment")]
    NotOwner,

    #[error("You can only cancel appointments 2 hours in advance")]
    CancelWindowClosed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
