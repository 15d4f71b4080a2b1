//! Domain layer - Core business logic and entities

pub mod cascade;
pub mod clock;
pub mod error;
pub mod forecast;
pub mod format;
pub mod storage;

pub use cascade::{
    CascadeOption, CascadePicker, CascadeTree, CascadeValidationError, OptionTree, SelectionPath,
    SelectionState,
};
pub use clock::{Clock, DebounceTimer, ManualClock, SystemClock};
pub use error::DomainError;
pub use forecast::{
    ForecastBreakdown, ForecastParameters, ModelWeight, MonthlyForecast, SavedConfig,
    SavedConfigId, TemplateCatalog, WeightConfig, WeightEngine, WeightTemplate, WeightValidation,
    WeightValidationError,
};
pub use storage::{Storage, StorageEntity, StorageKey};
