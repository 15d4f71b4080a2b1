//! Named, predefined weight configurations

use serde::{Deserialize, Serialize};

use super::entity::ModelWeight;
use super::validation::{
    total_enabled_weight, validate_config_name, validate_model_set, WeightValidationError,
    TARGET_TOTAL_WEIGHT,
};

/// Raw template as written in configuration, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub models: Vec<ModelWeight>,
}

/// A named model set whose enabled weights sum to 100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TemplateDefinition")]
pub struct WeightTemplate {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    models: Vec<ModelWeight>,
}

impl WeightTemplate {
    pub fn new(
        name: impl Into<String>,
        models: Vec<ModelWeight>,
    ) -> Result<Self, WeightValidationError> {
        let name = name.into();
        validate_config_name(&name)?;
        validate_model_set(&models)?;

        let total = total_enabled_weight(&models);
        if total != i64::from(TARGET_TOTAL_WEIGHT) {
            return Err(WeightValidationError::InvalidWeightSum(total));
        }

        Ok(Self {
            name,
            description: None,
            models,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn models(&self) -> &[ModelWeight] {
        &self.models
    }
}

impl TryFrom<TemplateDefinition> for WeightTemplate {
    type Error = WeightValidationError;

    fn try_from(value: TemplateDefinition) -> Result<Self, Self::Error> {
        let template = Self::new(value.name, value.models)?;

        Ok(match value.description {
            Some(description) => template.with_description(description),
            None => template,
        })
    }
}

/// The fixed set of templates offered to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<WeightTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<WeightTemplate>) -> Self {
        Self { templates }
    }

    pub fn get(&self, name: &str) -> Option<&WeightTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(WeightTemplate::name)
    }

    pub fn templates(&self) -> &[WeightTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new(default_templates())
    }
}

/// Built-in conservative, balanced and aggressive templates
pub fn default_templates() -> Vec<WeightTemplate> {
    let conservative = WeightTemplate::new(
        "conservative",
        vec![
            ModelWeight::new("ARIMA", 35),
            ModelWeight::new("Prophet", 30),
            ModelWeight::new("LSTM", 0).with_enabled(false),
            ModelWeight::new("XGBoost", 10),
            ModelWeight::new("Linear Regression", 25),
        ],
    )
    .map(|t| t.with_description("Favors stable statistical models"));

    let balanced = WeightTemplate::new(
        "balanced",
        vec![
            ModelWeight::new("ARIMA", 20),
            ModelWeight::new("Prophet", 20),
            ModelWeight::new("LSTM", 20),
            ModelWeight::new("XGBoost", 20),
            ModelWeight::new("Linear Regression", 20),
        ],
    )
    .map(|t| t.with_description("Equal share for every model"));

    let aggressive = WeightTemplate::new(
        "aggressive",
        vec![
            ModelWeight::new("ARIMA", 0).with_enabled(false),
            ModelWeight::new("Prophet", 20),
            ModelWeight::new("LSTM", 45),
            ModelWeight::new("XGBoost", 35),
            ModelWeight::new("Linear Regression", 0).with_enabled(false),
        ],
    )
    .map(|t| t.with_description("Leans on machine learning models"));

    [conservative, balanced, aggressive]
        .into_iter()
        .map(|t| t.unwrap_or_else(|e| unreachable!("built-in template is invalid: {}", e)))
        .collect()
}
