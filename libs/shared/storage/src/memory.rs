use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::{
    Appointment, AppointmentWithClient, AppointmentWithParties, AppointmentWithProvider,
    NewAppointment, NewNotification, Notification, Party, PublicProfile, User,
};

use crate::store::{AppointmentStore, NotificationStore, StoreError, UserStore};

/// In-memory store used by service tests. Enforces the same slot
/// uniqueness rule the database index does, so conflict paths can be
/// exercised without a backend.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    notifications: RwLock<HashMap<Uuid, Notification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn add_appointment(&self, appointment: Appointment) {
        self.appointments
            .write()
            .await
            .insert(appointment.id, appointment);
    }

    pub async fn get_appointment(&self, id: Uuid) -> Option<Appointment> {
        self.appointments.read().await.get(&id).cloned()
    }

    pub async fn notifications_for(&self, user_id: Uuid) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn require_user(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::Backend(format!("missing user row {}", id)))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_provider(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .filter(|u| u.provider)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_providers(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.provider)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn insert(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;

        let taken = appointments
            .values()
            .any(|a| a.provider_id == new.provider_id && a.date == new.date && !a.is_canceled());
        if taken {
            return Err(StoreError::Conflict(
                "duplicate key value violates unique constraint \"appointments_provider_slot\""
                    .to_string(),
            ));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            date: new.date,
            user_id: new.user_id,
            provider_id: new.provider_id,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        };
        appointments.insert(appointment.id, appointment.clone());

        Ok(appointment)
    }

    async fn find_at_slot(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        Ok(self
            .appointments
            .read()
            .await
            .values()
            .find(|a| a.provider_id == provider_id && a.date == date && !a.is_canceled())
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id && !a.is_canceled())
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);

        let mut out = Vec::new();
        for appointment in rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
        {
            let provider = self.require_user(appointment.provider_id).await?;
            out.push(AppointmentWithProvider {
                appointment,
                provider: PublicProfile {
                    id: provider.id,
                    name: provider.name,
                    avatar: provider.avatar,
                },
            });
        }

        Ok(out)
    }

    async fn find_with_parties(&self, id: Uuid) -> Result<AppointmentWithParties, StoreError> {
        let appointment = self
            .appointments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        let provider = Party::from(self.require_user(appointment.provider_id).await?);
        let user = Party::from(self.require_user(appointment.user_id).await?);

        Ok(AppointmentWithParties {
            appointment,
            provider,
            user,
        })
    }

    async fn mark_canceled(
        &self,
        id: Uuid,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments.get_mut(&id).ok_or(StoreError::NotFound)?;

        appointment.canceled_at = Some(canceled_at);
        appointment.updated_at = canceled_at;

        Ok(appointment.clone())
    }

    async fn day_schedule(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AppointmentWithClient>, StoreError> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .values()
            .filter(|a| a.provider_id == provider_id && a.date >= from && a.date <= to)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);

        let mut out = Vec::new();
        for appointment in rows {
            let user = self.require_user(appointment.user_id).await?;
            out.push(AppointmentWithClient {
                appointment,
                user: PublicProfile {
                    id: user.id,
                    name: user.name,
                    avatar: user.avatar,
                },
            });
        }

        Ok(out)
    }

    async fn day_bookings(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .values()
            .filter(|a| {
                a.provider_id == provider_id && !a.is_canceled() && a.date >= from && a.date <= to
            })
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);

        Ok(rows)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(&self, new: NewNotification) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            content: new.content,
            user_id: new.user_id,
            read: false,
            created_at: Utc::now(),
        };
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());

        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError> {
        self.notifications
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut rows: Vec<Notification> = self
            .notifications
            .read()
            .await
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);

        Ok(rows)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, StoreError> {
        let mut notifications = self.notifications.write().await;
        let notification = notifications
            .get_mut(&id)
            .filter(|n| n.user_id == user_id)
            .ok_or(StoreError::NotFound)?;

        notification.read = true;

        Ok(notification.clone())
    }
}
