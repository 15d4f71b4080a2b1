//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Key of a stored entity
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// String form used by backends that index by string
    fn as_str(&self) -> &str;
}

/// A value the host persists as a whole
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{
        ForecastParameters, ModelWeight, SavedConfig, SavedConfigId, WeightConfig, WeightEngine,
    };

    #[test]
    fn test_saved_config_id_as_storage_key() {
        let id = SavedConfigId::new("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(StorageKey::as_str(&id), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_saved_config_key_is_its_id() {
        let engine = WeightEngine::new(
            WeightConfig::new("华南", "华南蓝天航空油料有限公司")
                .with_model(ModelWeight::new("Prophet", 100)),
            ForecastParameters::default(),
        )
        .unwrap();
        let saved = SavedConfig::from_engine("华南单模型", &engine).unwrap();

        assert_eq!(saved.key(), saved.id());
    }
}
