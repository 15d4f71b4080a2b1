//! Forecast domain module for weighted multi-model blending
//!
//! This module provides the weight configuration types, the engine that validates,
//! normalizes and blends them, the template catalog and saved configuration snapshots.

mod catalog;
mod engine;
mod entity;
mod saved;
mod template;
mod validation;

// Re-export all public types
pub use catalog::{
    default_model_profiles, month_index, ForecastParameters, ModelProfile, SeasonalCurve,
    DEFAULT_REGION_MULTIPLIER, MONTHS_PER_YEAR,
};
pub use engine::{ForecastBreakdown, ModelContribution, MonthlyForecast, WeightEngine};
pub use entity::{ModelWeight, WeightConfig};
pub use saved::{SavedConfig, SavedConfigId};
pub use template::{default_templates, TemplateCatalog, TemplateDefinition, WeightTemplate};
pub use validation::{
    total_enabled_weight, validate_config_name, validate_model_name, validate_model_set,
    WeightValidation, WeightValidationError, TARGET_TOTAL_WEIGHT,
};
