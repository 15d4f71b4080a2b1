//! Saved configuration service - save, edit and delete weight snapshots

use std::sync::Arc;

use tracing::info;

use crate::domain::forecast::{SavedConfig, SavedConfigId, WeightEngine, WeightValidationError};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Saved configuration list backed by the host's storage
#[derive(Debug)]
pub struct SavedConfigService<S: Storage<SavedConfig>> {
    storage: Arc<S>,
}

impl<S: Storage<SavedConfig>> SavedConfigService<S> {
    /// Create a new SavedConfigService with the given storage
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Get a saved configuration by ID
    pub async fn get(&self, id: &str) -> Result<Option<SavedConfig>, DomainError> {
        let config_id = self.parse_id(id)?;
        self.storage.get(&config_id).await
    }

    /// Get a saved configuration by ID, returning an error if not found
    pub async fn get_required(&self, id: &str) -> Result<SavedConfig, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Saved config '{}' not found", id)))
    }

    /// List all saved configurations, most recently updated first
    pub async fn list(&self) -> Result<Vec<SavedConfig>, DomainError> {
        let mut configs = self.storage.list().await?;
        configs.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(configs)
    }

    /// List saved configurations for one region, optionally narrowed to a company
    pub async fn list_for_scope(
        &self,
        region: &str,
        company: Option<&str>,
    ) -> Result<Vec<SavedConfig>, DomainError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|c| c.config().region() == region)
            .filter(|c| company.is_none_or(|company| c.config().company() == company))
            .collect())
    }

    /// Save the engine's configuration under a new name.
    ///
    /// Fails with a validation error when the enabled weights do not sum to 100.
    pub async fn save(&self, name: &str, engine: &WeightEngine) -> Result<SavedConfig, DomainError> {
        let saved = SavedConfig::from_engine(name, engine).map_err(validation_error_to_domain)?;
        let saved = self.storage.create(saved).await?;

        info!(
            id = %saved.id(),
            name = %saved.name(),
            accuracy = saved.accuracy(),
            "Weight configuration saved"
        );

        Ok(saved)
    }

    /// Overwrite a saved configuration with the engine's current weights
    pub async fn update(&self, id: &str, engine: &WeightEngine) -> Result<SavedConfig, DomainError> {
        let mut saved = self.get_required(id).await?;
        saved
            .update_from_engine(engine)
            .map_err(validation_error_to_domain)?;

        self.storage.update(saved).await
    }

    /// Rename a saved configuration
    pub async fn rename(&self, id: &str, name: &str) -> Result<SavedConfig, DomainError> {
        let mut saved = self.get_required(id).await?;
        saved.rename(name).map_err(validation_error_to_domain)?;

        self.storage.update(saved).await
    }

    /// Delete a saved configuration by ID
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let config_id = self.parse_id(id)?;
        let deleted = self.storage.delete(&config_id).await?;

        if deleted {
            info!(id = %config_id, "Weight configuration deleted");
        }

        Ok(deleted)
    }

    /// Load a saved configuration back into an engine, replacing its weights and scope
    pub async fn load_into(&self, id: &str, engine: &mut WeightEngine) -> Result<(), DomainError> {
        let saved = self.get_required(id).await?;
        engine
            .load_config(saved.config().clone())
            .map_err(validation_error_to_domain)
    }

    fn parse_id(&self, id: &str) -> Result<SavedConfigId, DomainError> {
        SavedConfigId::new(id).map_err(validation_error_to_domain)
    }
}

fn validation_error_to_domain(error: WeightValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}
