//! Sales Forecast Core
//!
//! The state behind the sales dashboard's forecast controls:
//! - A cascading region → company → site picker over a static option tree
//! - A weighted blend of forecasting models whose enabled weights must sum to 100
//! - Weight templates, proportional auto-adjust and saved configurations
//!
//! Rendering is left to the host. Everything here is plain state driven by method calls.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;
pub use domain::{
    CascadePicker, CascadeTree, DomainError, OptionTree, SelectionPath, WeightConfig, WeightEngine,
};
