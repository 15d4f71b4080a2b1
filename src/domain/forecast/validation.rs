//! Weight configuration validation utilities

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::ModelWeight;
use crate::domain::format::format_weight;

/// Sum the enabled weights must reach
pub const TARGET_TOTAL_WEIGHT: i32 = 100;

/// Maximum length for model names
pub const MAX_MODEL_NAME_LENGTH: usize = 64;

/// Maximum length for saved configuration and template names
pub const MAX_CONFIG_NAME_LENGTH: usize = 100;

/// Validation errors raised at the construction and persistence boundaries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeightValidationError {
    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Model name exceeds maximum length of {0} characters")]
    ModelNameTooLong(usize),

    #[error("Duplicate model name: '{0}'")]
    DuplicateModelName(String),

    #[error("Configuration name cannot be empty")]
    EmptyConfigName,

    #[error("Configuration name exceeds maximum length of {0} characters")]
    ConfigNameTooLong(usize),

    #[error("Enabled model weights must sum to 100, got {0}")]
    InvalidWeightSum(i64),

    #[error("Invalid saved configuration ID: '{0}'")]
    InvalidConfigId(String),
}

/// Outcome of checking the weight-sum invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightValidation {
    pub is_valid: bool,
    pub total_weight: i64,
    pub message: String,
}

impl WeightValidation {
    /// Evaluate the invariant over a model list
    pub fn evaluate(models: &[ModelWeight]) -> Self {
        let total_weight = total_enabled_weight(models);
        let is_valid = total_weight == i64::from(TARGET_TOTAL_WEIGHT);

        let message = if is_valid {
            format!("Enabled model weights sum to {}", format_weight(TARGET_TOTAL_WEIGHT))
        } else if !models.iter().any(ModelWeight::is_enabled) {
            "No models are enabled".to_string()
        } else {
            let mut message = format!(
                "Enabled model weights sum to {}, expected {}",
                format_weight(total_weight),
                format_weight(TARGET_TOTAL_WEIGHT)
            );

            if let Some(model) = models
                .iter()
                .find(|m| m.is_enabled() && !(0..=TARGET_TOTAL_WEIGHT).contains(&m.weight()))
            {
                message.push_str(&format!(
                    " (model '{}' has out-of-range weight {})",
                    model.name(),
                    model.weight()
                ));
            }

            message
        };

        Self {
            is_valid,
            total_weight,
            message,
        }
    }
}

/// Sum of weights over enabled models, widened so extreme weights cannot overflow
pub fn total_enabled_weight(models: &[ModelWeight]) -> i64 {
    models
        .iter()
        .filter(|m| m.is_enabled())
        .map(|m| i64::from(m.weight()))
        .sum()
}

/// Validate a model name
pub fn validate_model_name(name: &str) -> Result<(), WeightValidationError> {
    if name.trim().is_empty() {
        return Err(WeightValidationError::EmptyModelName);
    }

    if name.chars().count() > MAX_MODEL_NAME_LENGTH {
        return Err(WeightValidationError::ModelNameTooLong(MAX_MODEL_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a saved configuration or template name
pub fn validate_config_name(name: &str) -> Result<(), WeightValidationError> {
    if name.trim().is_empty() {
        return Err(WeightValidationError::EmptyConfigName);
    }

    if name.chars().count() > MAX_CONFIG_NAME_LENGTH {
        return Err(WeightValidationError::ConfigNameTooLong(MAX_CONFIG_NAME_LENGTH));
    }

    Ok(())
}

/// Validate every name in a model list and reject duplicates
pub fn validate_model_set(models: &[ModelWeight]) -> Result<(), WeightValidationError> {
    let mut seen = HashSet::with_capacity(models.len());

    for model in models {
        validate_model_name(model.name())?;

        if !seen.insert(model.name()) {
            return Err(WeightValidationError::DuplicateModelName(
                model.name().to_string(),
            ));
        }
    }

    Ok(())
}
