//! Storage domain - Persistence boundary for saved configurations

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;
