//! Saved weight configuration entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::WeightEngine;
use super::entity::WeightConfig;
use super::validation::{validate_config_name, WeightValidationError};
use crate::domain::format::format_accuracy;
use crate::domain::storage::{StorageEntity, StorageKey};

// ============================================================================
// SavedConfigId
// ============================================================================

/// Unique identifier for a saved configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SavedConfigId(String);

impl SavedConfigId {
    /// Generate a fresh random ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an existing ID
    pub fn new(id: impl Into<String>) -> Result<Self, WeightValidationError> {
        let id = id.into();

        match Uuid::parse_str(&id) {
            Ok(uuid) => Ok(Self(uuid.hyphenated().to_string())),
            Err(_) => Err(WeightValidationError::InvalidConfigId(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SavedConfigId {
    type Error = WeightValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SavedConfigId> for String {
    fn from(id: SavedConfigId) -> Self {
        id.0
    }
}

impl fmt::Display for SavedConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for SavedConfigId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SavedConfig
// ============================================================================

/// A named snapshot of a valid weight configuration and its expected accuracy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConfig {
    id: SavedConfigId,
    name: String,
    config: WeightConfig,
    accuracy: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SavedConfig {
    /// Snapshot the engine's configuration under `name`.
    ///
    /// Only configurations whose enabled weights sum to 100 can be saved.
    pub fn from_engine(
        name: impl Into<String>,
        engine: &WeightEngine,
    ) -> Result<Self, WeightValidationError> {
        let name = name.into();
        validate_config_name(&name)?;
        ensure_valid(engine)?;

        let now = Utc::now();
        Ok(Self {
            id: SavedConfigId::generate(),
            name,
            config: engine.config().clone(),
            accuracy: engine.expected_accuracy(),
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &SavedConfigId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &WeightConfig {
        &self.config
    }

    /// Expected accuracy at the time of the last save, in percent
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), WeightValidationError> {
        let name = name.into();
        validate_config_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Replace the snapshot with the engine's current, valid configuration
    pub fn update_from_engine(&mut self, engine: &WeightEngine) -> Result<(), WeightValidationError> {
        ensure_valid(engine)?;
        self.config = engine.config().clone();
        self.accuracy = engine.expected_accuracy();
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for SavedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_accuracy(self.accuracy))
    }
}

fn ensure_valid(engine: &WeightEngine) -> Result<(), WeightValidationError> {
    let validation = engine.validate();

    if validation.is_valid {
        Ok(())
    } else {
        Err(WeightValidationError::InvalidWeightSum(validation.total_weight))
    }
}

impl StorageEntity for SavedConfig {
    type Key = SavedConfigId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::catalog::ForecastParameters;
    use crate::domain::forecast::entity::ModelWeight;

    fn engine(weights: &[(&str, i32)]) -> WeightEngine {
        let models = weights
            .iter()
            .map(|(name, weight)| ModelWeight::new(*name, *weight))
            .collect();

        WeightEngine::new(
            WeightConfig::new("华东", "华东航空燃料有限公司").with_models(models),
            ForecastParameters::default(),
        )
        .unwrap()
    }

    mod saved_config_id_tests {
        use super::*;

        #[test]
        fn test_generate_is_unique() {
            assert_ne!(SavedConfigId::generate(), SavedConfigId::generate());
        }

        #[test]
        fn test_parse_valid_id() {
            let id = SavedConfigId::new("550e8400-e29b-41d4-a716-446655440000").unwrap();
            assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_invalid_id() {
            assert_eq!(
                SavedConfigId::new("not-a-uuid"),
                Err(WeightValidationError::InvalidConfigId("not-a-uuid".to_string()))
            );
        }

        #[test]
        fn test_serialization() {
            let id = SavedConfigId::new("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");

            let parsed: SavedConfigId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, id);
        }
    }

    mod saved_config_tests {
        use super::*;

        #[test]
        fn test_from_valid_engine() {
            let engine = engine(&[("LSTM", 60), ("XGBoost", 40)]);
            let saved = SavedConfig::from_engine("华东主力配置", &engine).unwrap();

            assert_eq!(saved.name(), "华东主力配置");
            assert_eq!(saved.config(), engine.config());
            assert!((saved.accuracy() - engine.expected_accuracy()).abs() < 1e-9);
            assert_eq!(saved.created_at(), saved.updated_at());
        }

        #[test]
        fn test_refuses_invalid_engine() {
            let engine = engine(&[("LSTM", 60), ("XGBoost", 30)]);

            assert_eq!(
                SavedConfig::from_engine("draft", &engine),
                Err(WeightValidationError::InvalidWeightSum(90))
            );
        }

        #[test]
        fn test_refuses_empty_name() {
            let engine = engine(&[("LSTM", 100)]);

            assert_eq!(
                SavedConfig::from_engine(" ", &engine),
                Err(WeightValidationError::EmptyConfigName)
            );
        }

        #[test]
        fn test_update_from_engine() {
            let mut engine = engine(&[("ARIMA", 50), ("Prophet", 50)]);
            let mut saved = SavedConfig::from_engine("mixed", &engine).unwrap();
            let before = saved.accuracy();

            engine.set_weight("ARIMA", 20);
            engine.set_weight("Prophet", 80);
            saved.update_from_engine(&engine).unwrap();

            assert_eq!(saved.config().model("Prophet").unwrap().weight(), 80);
            assert!(saved.accuracy() > before);
            assert!(saved.updated_at() >= saved.created_at());
        }

        #[test]
        fn test_update_refuses_invalid_edit() {
            let mut engine = engine(&[("ARIMA", 50), ("Prophet", 50)]);
            let mut saved = SavedConfig::from_engine("mixed", &engine).unwrap();

            engine.set_enabled("Prophet", false);

            assert_eq!(
                saved.update_from_engine(&engine),
                Err(WeightValidationError::InvalidWeightSum(50))
            );
            assert!(saved.config().model("Prophet").unwrap().is_enabled());
        }

        #[test]
        fn test_display_shows_accuracy() {
            // LSTM 91.3 and XGBoost 89.4 at 60/40
            let engine = engine(&[("LSTM", 60), ("XGBoost", 40)]);
            let saved = SavedConfig::from_engine("华东主力配置", &engine).unwrap();

            assert_eq!(saved.to_string(), "华东主力配置 (90.5%)");
        }

        #[test]
        fn test_rename() {
            let engine = engine(&[("LSTM", 100)]);
            let mut saved = SavedConfig::from_engine("old", &engine).unwrap();

            saved.rename("new").unwrap();
            assert_eq!(saved.name(), "new");
            assert!(saved.rename("").is_err());
            assert_eq!(saved.name(), "new");
        }

        #[test]
        fn test_serialization_roundtrip_keeps_key() {
            let engine = engine(&[("LSTM", 100)]);
            let saved = SavedConfig::from_engine("solo", &engine).unwrap();

            let json = serde_json::to_string(&saved).unwrap();
            let parsed: SavedConfig = serde_json::from_str(&json).unwrap();

            assert_eq!(parsed.key(), saved.key());
            assert_eq!(parsed.config(), saved.config());
        }
    }
}
