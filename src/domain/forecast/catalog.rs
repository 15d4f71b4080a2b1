//! Static forecasting parameters: model profiles, seasonal curve and region factors

use std::collections::HashMap;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of factors in a seasonal curve
pub const MONTHS_PER_YEAR: usize = 12;

/// Multiplier applied to regions without an explicit factor
pub const DEFAULT_REGION_MULTIPLIER: f64 = 1.0;

/// Zero-based position of a calendar month (January = 0)
pub fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

// ============================================================================
// ModelProfile
// ============================================================================

/// Static characteristics of one forecasting model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub name: String,
    /// Historical accuracy rating, in percent
    pub accuracy: f64,
    /// Prediction for January before region and seasonal adjustment
    pub baseline: f64,
    /// Change in the unadjusted prediction per month
    pub monthly_trend: f64,
}

impl ModelProfile {
    pub fn new(name: impl Into<String>, accuracy: f64, baseline: f64, monthly_trend: f64) -> Self {
        Self {
            name: name.into(),
            accuracy,
            baseline,
            monthly_trend,
        }
    }

    /// Base prediction for a month, scaled by the region multiplier
    pub fn base_prediction(&self, month: Month, region_multiplier: f64) -> f64 {
        (self.baseline + self.monthly_trend * month_index(month) as f64) * region_multiplier
    }
}

// ============================================================================
// SeasonalCurve
// ============================================================================

/// One demand factor per calendar month, shared by every model and region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SeasonalCurve([f64; MONTHS_PER_YEAR]);

impl SeasonalCurve {
    pub fn new(factors: [f64; MONTHS_PER_YEAR]) -> Self {
        Self(factors)
    }

    pub fn factor(&self, month: Month) -> f64 {
        self.0[month_index(month)]
    }

    pub fn factors(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.0
    }
}

impl Default for SeasonalCurve {
    fn default() -> Self {
        Self([
            0.85, 0.88, 0.95, 1.0, 1.1, 1.2, 1.3, 1.25, 1.1, 1.0, 0.92, 0.9,
        ])
    }
}

impl TryFrom<Vec<f64>> for SeasonalCurve {
    type Error = DomainError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        let len = value.len();
        let factors: [f64; MONTHS_PER_YEAR] = value.try_into().map_err(|_| {
            DomainError::configuration(format!(
                "Seasonal curve needs {} factors, got {}",
                MONTHS_PER_YEAR, len
            ))
        })?;

        if let Some(bad) = factors.iter().find(|f| !f.is_finite() || **f < 0.0) {
            return Err(DomainError::configuration(format!(
                "Seasonal factor {} must be a non-negative number",
                bad
            )));
        }

        Ok(Self(factors))
    }
}

impl From<SeasonalCurve> for Vec<f64> {
    fn from(curve: SeasonalCurve) -> Self {
        curve.0.to_vec()
    }
}

// ============================================================================
// ForecastParameters
// ============================================================================

/// Everything the blend needs besides the weights themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParameters {
    pub seasonal_curve: SeasonalCurve,
    pub region_multipliers: HashMap<String, f64>,
    pub models: Vec<ModelProfile>,
}

impl ForecastParameters {
    /// Relative demand factor of a region
    pub fn region_multiplier(&self, region: &str) -> f64 {
        self.region_multipliers
            .get(region)
            .copied()
            .unwrap_or(DEFAULT_REGION_MULTIPLIER)
    }

    /// Profile of a model by name
    pub fn profile(&self, name: &str) -> Option<&ModelProfile> {
        self.models.iter().find(|p| p.name == name)
    }

    /// Check values a config file could get wrong
    pub fn validate(&self) -> Result<(), DomainError> {
        for (region, multiplier) in &self.region_multipliers {
            if !multiplier.is_finite() || *multiplier <= 0.0 {
                return Err(DomainError::configuration(format!(
                    "Region multiplier for '{}' must be positive, got {}",
                    region, multiplier
                )));
            }
        }

        for profile in &self.models {
            if !(0.0..=100.0).contains(&profile.accuracy) {
                return Err(DomainError::configuration(format!(
                    "Accuracy of model '{}' must be between 0 and 100, got {}",
                    profile.name, profile.accuracy
                )));
            }
        }

        Ok(())
    }
}

impl Default for ForecastParameters {
    fn default() -> Self {
        let region_multipliers = [
            ("华北", 1.2),
            ("华东", 1.3),
            ("华南", 1.15),
            ("西南", 0.95),
            ("西北", 0.8),
            ("东北", 0.85),
        ]
        .into_iter()
        .map(|(region, factor)| (region.to_string(), factor))
        .collect();

        Self {
            seasonal_curve: SeasonalCurve::default(),
            region_multipliers,
            models: default_model_profiles(),
        }
    }
}

/// Profiles of the built-in forecasting models
pub fn default_model_profiles() -> Vec<ModelProfile> {
    vec![
        ModelProfile::new("ARIMA", 85.2, 12000.0, 150.0),
        ModelProfile::new("Prophet", 87.6, 12500.0, 120.0),
        ModelProfile::new("LSTM", 91.3, 13000.0, 180.0),
        ModelProfile::new("XGBoost", 89.4, 12800.0, 160.0),
        ModelProfile::new("Linear Regression", 78.5, 11500.0, 100.0),
    ]
}
