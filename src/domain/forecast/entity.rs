//! Weight configuration entities

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{total_enabled_weight, validate_model_set, WeightValidationError};
use crate::domain::cascade::SelectionPath;
use crate::domain::format::format_weight;

// ============================================================================
// ModelWeight
// ============================================================================

/// Weight and enabled flag of one named forecasting model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelWeight {
    name: String,
    weight: i32,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ModelWeight {
    /// Create an enabled model weight. The weight is stored as given, without clamping.
    pub fn new(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
            enabled: true,
        }
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Display for ModelWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, format_weight(self.weight))?;
        if !self.enabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

// ============================================================================
// WeightConfig
// ============================================================================

/// Raw configuration as stored by the host, before its model names are checked
#[derive(Debug, Deserialize)]
struct WeightConfigDefinition {
    region: String,
    company: String,
    models: Vec<ModelWeight>,
}

/// Blend configuration for one region/company scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeightConfigDefinition")]
pub struct WeightConfig {
    region: String,
    company: String,
    models: Vec<ModelWeight>,
}

impl WeightConfig {
    pub fn new(region: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            company: company.into(),
            models: Vec::new(),
        }
    }

    // Builder methods

    /// Add a model
    pub fn with_model(mut self, model: ModelWeight) -> Self {
        self.models.push(model);
        self
    }

    /// Replace all models
    pub fn with_models(mut self, models: Vec<ModelWeight>) -> Self {
        self.models = models;
        self
    }

    /// Take region and company from a cascade selection.
    ///
    /// Levels missing from the path leave the corresponding field unchanged.
    pub fn scoped_to(mut self, path: &SelectionPath) -> Self {
        if let Some(region) = path.region() {
            self.region = region.to_string();
        }
        if let Some(company) = path.company() {
            self.company = company.to_string();
        }
        self
    }

    // Getters

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn models(&self) -> &[ModelWeight] {
        &self.models
    }

    /// Find a model by name
    pub fn model(&self, name: &str) -> Option<&ModelWeight> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// Enabled models in declaration order
    pub fn enabled_models(&self) -> impl Iterator<Item = &ModelWeight> {
        self.models.iter().filter(|m| m.is_enabled())
    }

    /// Sum of weights over enabled models
    pub fn total_enabled_weight(&self) -> i64 {
        total_enabled_weight(&self.models)
    }

    // Mutators

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
    }

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.company = company.into();
    }

    pub(crate) fn model_mut(&mut self, name: &str) -> Option<&mut ModelWeight> {
        self.models.iter_mut().find(|m| m.name() == name)
    }

    pub(crate) fn models_mut(&mut self) -> &mut [ModelWeight] {
        &mut self.models
    }

    pub(crate) fn set_models(&mut self, models: Vec<ModelWeight>) {
        self.models = models;
    }
}

impl TryFrom<WeightConfigDefinition> for WeightConfig {
    type Error = WeightValidationError;

    fn try_from(definition: WeightConfigDefinition) -> Result<Self, Self::Error> {
        validate_model_set(&definition.models)?;

        Ok(Self {
            region: definition.region,
            company: definition.company,
            models: definition.models,
        })
    }
}
