//! Infrastructure layer - Logging setup, storage backends and services

pub mod logging;
pub mod services;
pub mod storage;
