//! Weighted multi-model forecast engine

use std::fmt;
use std::sync::Arc;

use chrono::Month;
use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use super::catalog::ForecastParameters;
use super::entity::{ModelWeight, WeightConfig};
use super::template::WeightTemplate;
use super::validation::{
    validate_model_set, WeightValidation, WeightValidationError, TARGET_TOTAL_WEIGHT,
};
use crate::domain::cascade::SelectionPath;
use crate::domain::format::format_quantity;

/// One model's share of a blended forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelContribution {
    pub name: String,
    pub weight: i32,
    /// Region- and season-adjusted prediction of this model alone
    pub prediction: f64,
    /// `prediction × weight / 100`
    pub contribution: f64,
}

/// Blended forecast for one month with its per-model parts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastBreakdown {
    pub month: u32,
    pub region_multiplier: f64,
    pub seasonal_factor: f64,
    pub contributions: Vec<ModelContribution>,
    pub total: i64,
}

impl fmt::Display for ForecastBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Month {}: {}", self.month, format_quantity(self.total))
    }
}

/// Blended forecast value for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyForecast {
    pub month: u32,
    pub value: i64,
}

/// Keeps a weight configuration and combines its models into one forecast.
///
/// Edits are pointwise and never rebalance other models; the weight-sum invariant is
/// checked on demand by [`WeightEngine::validate`] and repaired only by an explicit
/// [`WeightEngine::auto_adjust`]. Every computation runs on the weights as stored, valid or
/// not.
#[derive(Debug, Clone)]
pub struct WeightEngine {
    config: WeightConfig,
    parameters: Arc<ForecastParameters>,
}

impl WeightEngine {
    /// Build an engine over `config`.
    ///
    /// Model names must be non-empty and unique, since edits address models by name.
    pub fn new(
        config: WeightConfig,
        parameters: impl Into<Arc<ForecastParameters>>,
    ) -> Result<Self, WeightValidationError> {
        validate_model_set(config.models())?;

        Ok(Self {
            config,
            parameters: parameters.into(),
        })
    }

    pub fn config(&self) -> &WeightConfig {
        &self.config
    }

    pub fn into_config(self) -> WeightConfig {
        self.config
    }

    pub fn models(&self) -> &[ModelWeight] {
        self.config.models()
    }

    pub fn parameters(&self) -> &ForecastParameters {
        &self.parameters
    }

    // Mutation

    /// Set one model's weight. Returns false when no model has that name.
    pub fn set_weight(&mut self, name: &str, weight: i32) -> bool {
        match self.config.model_mut(name) {
            Some(model) => {
                model.set_weight(weight);
                debug!(model = %name, weight = weight, "Model weight updated");
                true
            }
            None => {
                warn!(model = %name, "Cannot set weight of unknown model");
                false
            }
        }
    }

    /// Enable or disable one model. Returns false when no model has that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.config.model_mut(name) {
            Some(model) => {
                model.set_enabled(enabled);
                debug!(model = %name, enabled = enabled, "Model toggled");
                true
            }
            None => {
                warn!(model = %name, "Cannot toggle unknown model");
                false
            }
        }
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.config.set_region(region);
    }

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.config.set_company(company);
    }

    /// Retarget region and company from a cascade selection
    pub fn scope_to(&mut self, path: &SelectionPath) {
        let config = std::mem::take(&mut self.config);
        self.config = config.scoped_to(path);
        debug!(
            region = %self.config.region(),
            company = %self.config.company(),
            "Weight configuration rescoped"
        );
    }

    /// Replace the whole configuration, e.g. with a saved snapshot.
    ///
    /// A model set with empty or repeated names is refused and the current one kept.
    pub fn load_config(&mut self, config: WeightConfig) -> Result<(), WeightValidationError> {
        validate_model_set(config.models())?;

        self.config = config;
        debug!(
            region = %self.config.region(),
            models = self.config.models().len(),
            "Weight configuration loaded"
        );

        Ok(())
    }

    /// Replace the model set wholesale with a template's
    pub fn apply_template(&mut self, template: &WeightTemplate) {
        self.config.set_models(template.models().to_vec());
        counter!("weight_engine_templates_applied_total", "template" => template.name().to_string())
            .increment(1);
        debug!(template = %template.name(), "Weight template applied");
    }

    // Invariant

    /// Check whether the enabled weights sum to 100
    pub fn validate(&self) -> WeightValidation {
        let validation = WeightValidation::evaluate(self.config.models());

        if !validation.is_valid {
            counter!("weight_engine_invalid_validations_total").increment(1);
        }

        validation
    }

    /// Rescale enabled weights proportionally so they sum to (about) 100.
    ///
    /// Each weight is rounded on its own, so the new total may be off by a little. Returns
    /// whether any weight changed; a zero or already-normalized total is left alone.
    pub fn auto_adjust(&mut self) -> bool {
        let total = self.config.total_enabled_weight();

        if total == 0 {
            warn!("Cannot auto-adjust weights: no enabled weight to rescale");
            return false;
        }

        if total == i64::from(TARGET_TOTAL_WEIGHT) {
            return false;
        }

        let scale = f64::from(TARGET_TOTAL_WEIGHT) / total as f64;
        let mut changed = false;

        for model in self.config.models_mut().iter_mut().filter(|m| m.is_enabled()) {
            let adjusted = (f64::from(model.weight()) * scale).round() as i32;
            if adjusted != model.weight() {
                model.set_weight(adjusted);
                changed = true;
            }
        }

        counter!("weight_engine_auto_adjust_total").increment(1);
        debug!(
            previous_total = total,
            new_total = self.config.total_enabled_weight(),
            "Weights auto-adjusted"
        );

        changed
    }

    // Forecasting

    /// Region- and season-adjusted prediction of a single model
    pub fn model_prediction(&self, name: &str, month: Month) -> Option<f64> {
        let profile = self.parameters.profile(name)?;
        let region_multiplier = self.parameters.region_multiplier(self.config.region());

        Some(
            profile.base_prediction(month, region_multiplier)
                * self.parameters.seasonal_curve.factor(month),
        )
    }

    /// Per-model contributions and the blended total for a month.
    ///
    /// Disabled models are left out. Models without a profile are logged and contribute
    /// nothing.
    pub fn forecast_breakdown(&self, month: Month) -> ForecastBreakdown {
        let contributions: Vec<ModelContribution> = self
            .config
            .enabled_models()
            .filter_map(|model| {
                let Some(prediction) = self.model_prediction(model.name(), month) else {
                    warn!(model = %model.name(), "No forecast profile for model, skipping");
                    return None;
                };

                Some(ModelContribution {
                    name: model.name().to_string(),
                    weight: model.weight(),
                    prediction,
                    contribution: prediction * f64::from(model.weight())
                        / f64::from(TARGET_TOTAL_WEIGHT),
                })
            })
            .collect();

        let total = contributions.iter().map(|c| c.contribution).sum::<f64>().round() as i64;

        ForecastBreakdown {
            month: month.number_from_month(),
            region_multiplier: self.parameters.region_multiplier(self.config.region()),
            seasonal_factor: self.parameters.seasonal_curve.factor(month),
            contributions,
            total,
        }
    }

    /// Blended prediction for a month, rounded to an integer
    pub fn blended_forecast(&self, month: Month) -> i64 {
        self.forecast_breakdown(month).total
    }

    /// Blended predictions for consecutive months starting at `start`
    pub fn forecast_series(&self, start: Month, months: usize) -> Vec<MonthlyForecast> {
        std::iter::successors(Some(start), |m| Some(m.succ()))
            .take(months)
            .map(|month| MonthlyForecast {
                month: month.number_from_month(),
                value: self.blended_forecast(month),
            })
            .collect()
    }

    /// Weight-share average of the enabled models' accuracy ratings
    pub fn expected_accuracy(&self) -> f64 {
        self.config
            .enabled_models()
            .filter_map(|model| {
                self.parameters
                    .profile(model.name())
                    .map(|p| p.accuracy * f64::from(model.weight()))
            })
            .sum::<f64>()
            / f64::from(TARGET_TOTAL_WEIGHT)
    }
}
