use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{AppointmentWithParties, Party};

// ============================================================================
// MAIL QUEUE MODELS
// ============================================================================

/// Everything the mail worker needs to compose the cancellation email:
/// the slot, when it was canceled, and who sat on each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanceledAppointment {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub user: Party,
    pub provider: Party,
}

impl From<AppointmentWithParties> for CanceledAppointment {
    fn from(row: AppointmentWithParties) -> Self {
        CanceledAppointment {
            id: row.appointment.id,
            date: row.appointment.date,
            canceled_at: row.appointment.canceled_at,
            user: row.user,
            provider: row.provider,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationMailJob {
    pub job_id: Uuid,
    pub appointment: CanceledAppointment,
    pub created_at: DateTime<Utc>,
}

impl CancellationMailJob {
    /// Redis key family for this job type.
    pub const KEY: &'static str = "cancellation_mail";

    pub fn new(appointment: CanceledAppointment) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            appointment,
            created_at: Utc::now(),
        }
    }
}
