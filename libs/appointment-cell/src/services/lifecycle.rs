// libs/appointment-cell/src/services/lifecycle.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use mail_queue_cell::{CanceledAppointment, CancellationMailJob, MailQueue, RedisMailQueue};
use shared_config::AppConfig;
use shared_storage::{AppointmentStore, StoreError, SupabaseStore};

use crate::models::{AppointmentError, CanceledAppointmentResponse};

// ==============================================================================
// CANCELLATION
// ==============================================================================

pub struct AppointmentLifecycleService {
    appointments: Arc<dyn AppointmentStore>,
    queue: Option<Arc<dyn MailQueue>>,
}

impl AppointmentLifecycleService {
    pub fn new(config: &AppConfig) -> Self {
        let queue: Option<Arc<dyn MailQueue>> = match RedisMailQueue::new(config) {
            Ok(queue) => Some(Arc::new(queue)),
            Err(e) => {
                warn!("Cancellation mail queue unavailable: {}", e);
                None
            }
        };

        Self {
            appointments: Arc::new(SupabaseStore::new(config)),
            queue,
        }
    }

    pub fn with_stores(
        appointments: Arc<dyn AppointmentStore>,
        queue: Arc<dyn MailQueue>,
    ) -> Self {
        Self {
            appointments,
            queue: Some(queue),
        }
    }

    /// Cancels one of the caller's appointments. Only the client who
    /// booked it may cancel, and only while the slot is still at least
    /// two hours away. On success a cancellation mail job is queued for
    /// the mail worker.
    pub async fn cancel(
        &self,
        requesting_user_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<CanceledAppointmentResponse, AppointmentError> {
        let mut row = self
            .appointments
            .find_with_parties(appointment_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppointmentError::NotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        if row.appointment.user_id != requesting_user_id {
            return Err(AppointmentError::NotOwner);
        }

        let now = Utc::now();
        if !row.appointment.is_cancelable(now) {
            return Err(AppointmentError::CancelWindowClosed);
        }

        let updated = self
            .appointments
            .mark_canceled(appointment_id, now)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppointmentError::NotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;
        row.appointment = updated;

        info!(
            "Appointment {} canceled by user {}",
            appointment_id, requesting_user_id
        );

        self.enqueue_cancellation_mail(&row).await;

        Ok(CanceledAppointmentResponse::from_row(row, now))
    }

    /// Best-effort handoff to the mail worker. The cancellation is
    /// already stored, so a queue failure is logged and swallowed.
    async fn enqueue_cancellation_mail(&self, row: &shared_models::AppointmentWithParties) {
        let Some(queue) = &self.queue else {
            warn!(
                "No mail queue configured, skipping cancellation mail for {}",
                row.appointment.id
            );
            return;
        };

        let job = CancellationMailJob::new(CanceledAppointment::from(row.clone()));
        if let Err(e) = queue.submit(job).await {
            warn!(
                "Failed to queue cancellation mail for appointment {}: {}",
                row.appointment.id, e
            );
        }
    }
}
