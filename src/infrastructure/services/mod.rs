//! Infrastructure services

mod saved_config_service;

pub use saved_config_service::SavedConfigService;
