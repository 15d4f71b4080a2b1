use std::time::Duration;

use serde::Deserialize;

use crate::domain::cascade::{default_regions, CascadeOption, CascadePicker, CascadeTree, OptionTree};
use crate::domain::clock::Clock;
use crate::domain::forecast::{ForecastParameters, TemplateCatalog, WeightTemplate};
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub picker: PickerConfig,
    pub forecast: ForecastParameters,
    pub templates: Vec<WeightTemplate>,
    pub regions: Vec<CascadeOption>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Delay between a leaf selection and the popover closing
    pub auto_close_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            picker: PickerConfig::default(),
            forecast: ForecastParameters::default(),
            templates: TemplateCatalog::default().templates().to_vec(),
            regions: default_regions(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            auto_close_delay_ms: 150,
        }
    }
}

impl PickerConfig {
    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(self.auto_close_delay_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name("config/local").required(false))
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load and check the configuration in one step
    pub fn load_validated() -> Result<Self, DomainError> {
        let config = Self::load().map_err(|e| DomainError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<(), DomainError> {
        self.forecast.validate()?;
        self.option_tree()?;

        if self.templates.is_empty() {
            return Err(DomainError::configuration(
                "At least one weight template must be configured",
            ));
        }

        let catalog = self.template_catalog();
        for template in catalog.templates() {
            if catalog
                .templates()
                .iter()
                .filter(|t| t.name() == template.name())
                .count()
                > 1
            {
                return Err(DomainError::configuration(format!(
                    "Duplicate weight template '{}'",
                    template.name()
                )));
            }
        }

        Ok(())
    }

    /// The configured region catalog as a validated tree
    pub fn option_tree(&self) -> Result<OptionTree, DomainError> {
        Ok(OptionTree::new(self.regions.clone())?)
    }

    pub fn template_catalog(&self) -> TemplateCatalog {
        TemplateCatalog::new(self.templates.clone())
    }

    /// A closed picker over the configured regions using the configured close delay
    pub fn cascade_picker<C: Clock>(&self, clock: C) -> Result<CascadePicker<C>, DomainError> {
        let tree = CascadeTree::new(self.option_tree()?);
        Ok(CascadePicker::with_delay(
            tree,
            clock,
            self.picker.auto_close_delay(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Result<AppConfig, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::from_str(json, ::config::FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.picker.auto_close_delay(), Duration::from_millis(150));
        assert_eq!(config.templates.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_json("{}").unwrap();

        assert_eq!(config.forecast, ForecastParameters::default());
        assert_eq!(config.option_tree().unwrap().roots().len(), 4);
    }

    #[test]
    fn test_partial_override() {
        let config = from_json(
            r#"{
                "logging": {"format": "json"},
                "picker": {"auto_close_delay_ms": 300}
            }"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.picker.auto_close_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_custom_templates() {
        let config = from_json(
            r#"{
                "templates": [
                    {"name": "lstm-only", "models": [{"name": "LSTM", "weight": 100}]}
                ]
            }"#,
        )
        .unwrap();

        let catalog = config.template_catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["lstm-only"]);
    }

    #[test]
    fn test_invalid_template_sum_is_rejected() {
        let result = from_json(
            r#"{
                "templates": [
                    {"name": "broken", "models": [{"name": "LSTM", "weight": 90}]}
                ]
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_short_seasonal_curve_is_rejected() {
        let result = from_json(r#"{"forecast": {"seasonal_curve": [1.0, 1.0, 1.0]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_templates() {
        let mut config = AppConfig::default();
        config.templates.push(config.templates[0].clone());

        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_region_tree() {
        let mut config = AppConfig::default();
        config.regions.push(CascadeOption::new("华东", "重复"));

        assert!(matches!(config.validate(), Err(DomainError::Cascade(_))));
    }

    #[test]
    fn test_cascade_picker_uses_configured_delay() {
        use crate::domain::clock::ManualClock;

        let config = from_json(r#"{"picker": {"auto_close_delay_ms": 40}}"#).unwrap();
        let clock = ManualClock::new();
        let mut picker = config.cascade_picker(clock.clone()).unwrap();

        picker.open();
        picker.select("华南", 0).unwrap();
        picker.select("华南蓝天航空油料有限公司", 1).unwrap();
        picker.select("广州白云机场", 2).unwrap();
        assert!(picker.is_close_pending());

        clock.advance(Duration::from_millis(40));
        picker.poll();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_validate_rejects_empty_templates() {
        let mut config = AppConfig::default();
        config.templates.clear();

        assert!(config.validate().is_err());
    }
}
