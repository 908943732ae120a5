// libs/provider-cell/src/services/availability.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_storage::{AppointmentStore, SupabaseStore};
use shared_utils::time::{day_bounds, start_of_hour};

use crate::models::{HourSlot, ProviderError};

/// Bookable day runs 08:00 through 19:00, twelve hour slots.
pub const GRID_START_HOUR: u32 = 8;
pub const GRID_END_HOUR: u32 = 19;

// ==============================================================================
// DAY AVAILABILITY
// ==============================================================================

pub struct DayAvailabilityService {
    appointments: Arc<dyn AppointmentStore>,
}

impl DayAvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appointments: Arc::new(SupabaseStore::new(config)),
        }
    }

    pub fn with_stores(appointments: Arc<dyn AppointmentStore>) -> Self {
        Self { appointments }
    }

    /// The provider's hour grid for the day containing `date`. A slot
    /// is available while it lies in the future and no active booking
    /// occupies it.
    pub async fn day_grid(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Vec<HourSlot>, ProviderError> {
        let (from, to) = day_bounds(date);
        let booked = self
            .appointments
            .day_bookings(provider_id, from, to)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let taken: HashSet<DateTime<Utc>> =
            booked.iter().map(|a| start_of_hour(a.date)).collect();

        let day = date.date_naive();
        let now = Utc::now();

        let grid = (GRID_START_HOUR..=GRID_END_HOUR)
            .map(|hour| {
                let value = day.and_hms_opt(hour, 0, 0).unwrap().and_utc();
                HourSlot {
                    time: format!("{:02}:00", hour),
                    value,
                    available: value > now && !taken.contains(&value),
                }
            })
            .collect();

        Ok(grid)
    }
}
