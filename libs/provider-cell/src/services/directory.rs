// libs/provider-cell/src/services/directory.rs
use std::sync::Arc;

use shared_config::AppConfig;
use shared_models::ProviderProfile;
use shared_storage::{SupabaseStore, UserStore};

use crate::models::ProviderError;

// ==============================================================================
// PROVIDER DIRECTORY
// ==============================================================================

pub struct ProviderDirectoryService {
    users: Arc<dyn UserStore>,
}

impl ProviderDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            users: Arc::new(SupabaseStore::new(config)),
        }
    }

    pub fn with_stores(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Every account with the provider flag set, in directory shape.
    pub async fn list(&self) -> Result<Vec<ProviderProfile>, ProviderError> {
        let providers = self
            .users
            .list_providers()
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        Ok(providers.into_iter().map(ProviderProfile::from).collect())
    }
}
