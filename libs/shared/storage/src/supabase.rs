use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{
    Appointment, AppointmentWithClient, AppointmentWithParties, AppointmentWithProvider,
    NewAppointment, NewNotification, Notification, User,
};

use crate::client::SupabaseClient;
use crate::store::{AppointmentStore, NotificationStore, StoreError, UserStore};

/// Embedded select for an account row with its avatar resolved.
const USER_SELECT: &str = "id,name,email,provider,avatar:uploads(id,path,url)";

/// Production store backed by Supabase PostgREST.
///
/// Joins lean on PostgREST resource embedding. The appointments table
/// carries two foreign keys into `users`, so embeds name the constraint
/// they follow.
pub struct SupabaseStore {
    client: Arc<SupabaseClient>,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Arc::new(SupabaseClient::new(config)),
        }
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    fn encode_date(date: DateTime<Utc>) -> String {
        urlencoding::encode(&date.to_rfc3339()).into_owned()
    }
}

#[async_trait]
impl UserStore for SupabaseStore {
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let path = format!("/rest/v1/users?id=eq.{}&select={}", id, USER_SELECT);
        let result: Vec<User> = self.client.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn find_provider(&self, id: Uuid) -> Result<User, StoreError> {
        let path = format!(
            "/rest/v1/users?id=eq.{}&provider=is.true&select={}",
            id, USER_SELECT
        );
        let result: Vec<User> = self.client.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn list_providers(&self) -> Result<Vec<User>, StoreError> {
        let path = format!("/rest/v1/users?provider=is.true&select={}", USER_SELECT);
        self.client.request(Method::GET, &path, None).await
    }
}

#[async_trait]
impl AppointmentStore for SupabaseStore {
    async fn insert(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let body = json!({
            "user_id": new.user_id,
            "provider_id": new.provider_id,
            "date": new.date.to_rfc3339(),
        });

        let result: Vec<Appointment> = self
            .client
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("insert returned no row".to_string()))
    }

    async fn find_at_slot(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&date=eq.{}&canceled_at=is.null",
            provider_id,
            Self::encode_date(date)
        );
        let result: Vec<Appointment> = self.client.request(Method::GET, &path, None).await?;

        Ok(result.into_iter().next())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?user_id=eq.{}&canceled_at=is.null\
             &select=*,provider:users!appointments_provider_id_fkey(id,name,avatar:uploads(id,path,url))\
             &order=date.asc&limit={}&offset={}",
            user_id, limit, offset
        );
        self.client.request(Method::GET, &path, None).await
    }

    async fn find_with_parties(&self, id: Uuid) -> Result<AppointmentWithParties, StoreError> {
        let path = format!(
            "/rest/v1/appointments?id=eq.{}\
             &select=*,provider:users!appointments_provider_id_fkey(id,name,email),\
             user:users!appointments_user_id_fkey(id,name,email)",
            id
        );
        let result: Vec<AppointmentWithParties> =
            self.client.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn mark_canceled(
        &self,
        id: Uuid,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        let body = json!({
            "canceled_at": canceled_at.to_rfc3339(),
            "updated_at": canceled_at.to_rfc3339(),
        });

        let result: Vec<Appointment> = self
            .client
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn day_schedule(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AppointmentWithClient>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&date=gte.{}&date=lte.{}\
             &select=*,user:users!appointments_user_id_fkey(id,name,avatar:uploads(id,path,url))\
             &order=date.asc",
            provider_id,
            Self::encode_date(from),
            Self::encode_date(to)
        );
        self.client.request(Method::GET, &path, None).await
    }

    async fn day_bookings(
        &self,
        provider_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&canceled_at=is.null&date=gte.{}&date=lte.{}&order=date.asc",
            provider_id,
            Self::encode_date(from),
            Self::encode_date(to)
        );
        self.client.request(Method::GET, &path, None).await
    }
}

#[async_trait]
impl NotificationStore for SupabaseStore {
    async fn insert(&self, new: NewNotification) -> Result<Notification, StoreError> {
        let body = json!({
            "content": new.content,
            "user_id": new.user_id,
        });

        let result: Vec<Notification> = self
            .client
            .request_with_headers(
                Method::POST,
                "/rest/v1/notifications",
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("insert returned no row".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError> {
        let path = format!("/rest/v1/notifications?id=eq.{}", id);
        let result: Vec<Notification> = self.client.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let path = format!(
            "/rest/v1/notifications?user_id=eq.{}&order=created_at.desc&limit={}",
            user_id, limit
        );
        self.client.request(Method::GET, &path, None).await
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, StoreError> {
        let path = format!(
            "/rest/v1/notifications?id=eq.{}&user_id=eq.{}",
            id, user_id
        );
        let body = json!({ "read": true });

        let result: Vec<Notification> = self
            .client
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        result.into_iter().next().ok_or(StoreError::NotFound)
    }
}
