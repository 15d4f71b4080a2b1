//! Cascade domain module for the region → company → site picker
//!
//! This module provides the option tree model, the selection path it drives, and the
//! popover picker that wraps both.

mod catalog;
mod option;
mod path;
mod picker;
mod tree;
mod validation;

// Re-export all public types
pub use catalog::{default_option_tree, default_regions};
pub use option::{CascadeOption, OptionTree};
pub use path::{SelectionPath, SelectionState};
pub use picker::{CascadePicker, DEFAULT_AUTO_CLOSE_DELAY};
pub use tree::CascadeTree;
pub use validation::{validate_options, CascadeValidationError, MAX_DEPTH};
