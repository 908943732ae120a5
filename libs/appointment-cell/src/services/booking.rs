// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{NewAppointment, NewNotification};
use shared_storage::{
    AppointmentStore, NotificationStore, StoreError, SupabaseStore, UserStore,
};
use shared_utils::locale::long_date_pt_br;

use crate::models::{
    AppointmentError, AppointmentListEntry, AppointmentResponse, BookAppointmentRequest,
};
use crate::services::availability::SlotAvailabilityService;

/// Listing page size. Clients page through their history twenty rows
/// at a time.
pub const PAGE_SIZE: i64 = 20;

// ==============================================================================
// BOOKING SERVICE
// ==============================================================================

pub struct AppointmentBookingService {
    users: Arc<dyn UserStore>,
    appointments: Arc<dyn AppointmentStore>,
    notifications: Arc<dyn NotificationStore>,
    availability: SlotAvailabilityService,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(SupabaseStore::new(config));
        Self {
            users: store.clone(),
            appointments: store.clone(),
            notifications: store.clone(),
            availability: SlotAvailabilityService::with_stores(store.clone(), store),
        }
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        appointments: Arc<dyn AppointmentStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            availability: SlotAvailabilityService::with_stores(
                users.clone(),
                appointments.clone(),
            ),
            users,
            appointments,
            notifications,
        }
    }

    /// Page of the client's active appointments, soonest first.
    /// `page` is 1-based; anything below 1 reads as the first page.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: Option<i64>,
    ) -> Result<Vec<AppointmentListEntry>, AppointmentError> {
        let page = page.unwrap_or(1).max(1);
        let offset = (page - 1) * PAGE_SIZE;

        let rows = self
            .appointments
            .list_for_user(user_id, PAGE_SIZE, offset)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|row| AppointmentListEntry::from_row(row, now))
            .collect())
    }

    /// Books a slot with a provider. The slot must pass the
    /// availability rules; on success the provider gets a notification
    /// about the new booking.
    pub async fn create(
        &self,
        requesting_user_id: Uuid,
        request: BookAppointmentRequest,
    ) -> Result<AppointmentResponse, AppointmentError> {
        let hour_start = self
            .availability
            .ensure_bookable(request.provider_id, requesting_user_id, request.date)
            .await?;

        let appointment = self
            .appointments
            .insert(NewAppointment {
                date: hour_start,
                user_id: requesting_user_id,
                provider_id: request.provider_id,
            })
            .await
            .map_err(|e| match e {
                // Two requests raced for the slot; the uniqueness rule
                // caught the loser.
                StoreError::Conflict(_) => AppointmentError::SlotUnavailable,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        info!(
            "Appointment {} booked with provider {} at {}",
            appointment.id, appointment.provider_id, appointment.date
        );

        self.notify_provider(requesting_user_id, &appointment).await;

        Ok(AppointmentResponse::from_record(appointment, Utc::now()))
    }

    /// Best-effort side effect: a failed notification never unwinds a
    /// booking that is already stored.
    async fn notify_provider(
        &self,
        requesting_user_id: Uuid,
        appointment: &shared_models::Appointment,
    ) {
        let user = match self.users.find_by_id(requesting_user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(
                    "Skipping booking notification, could not load user {}: {}",
                    requesting_user_id, e
                );
                return;
            }
        };

        let content = format!(
            "Novo agendamento de {} para o {}",
            user.name,
            long_date_pt_br(appointment.date)
        );

        if let Err(e) = self
            .notifications
            .insert(NewNotification {
                content,
                user_id: appointment.provider_id,
            })
            .await
        {
            warn!(
                "Failed to notify provider {} of appointment {}: {}",
                appointment.provider_id, appointment.id, e
            );
        }
    }
}
