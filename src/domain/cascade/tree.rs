//! Cascade selection state over a fixed option tree

use std::sync::Arc;

use tracing::{debug, warn};

use super::option::{CascadeOption, OptionTree};
use super::path::{SelectionPath, SelectionState};
use super::validation::MAX_DEPTH;
use crate::domain::format::format_label_chain;

/// Holds one selection path that is always a valid walk of its option tree.
///
/// Each picker on a page owns its own `CascadeTree`; the option tree itself is shared
/// read-only.
#[derive(Debug, Clone)]
pub struct CascadeTree {
    options: Arc<OptionTree>,
    path: SelectionPath,
}

impl CascadeTree {
    pub fn new(options: impl Into<Arc<OptionTree>>) -> Self {
        Self {
            options: options.into(),
            path: SelectionPath::new(),
        }
    }

    pub fn options(&self) -> &OptionTree {
        &self.options
    }

    /// The current selection
    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn selection_state(&self) -> SelectionState {
        self.path.state()
    }

    /// Options to offer at `level` given the current selection.
    ///
    /// Level 0 offers the roots; deeper levels offer the children of the option selected one
    /// level up, or nothing when that level is unset.
    pub fn options_at(&self, level: usize) -> &[CascadeOption] {
        if level >= MAX_DEPTH || level > self.path.len() {
            return &[];
        }

        if level == 0 {
            return self.options.roots();
        }

        self.options
            .resolve(&self.path.as_slice()[..level])
            .map(CascadeOption::children)
            .unwrap_or(&[])
    }

    /// Select `value` at `level`, dropping every deeper entry.
    ///
    /// Returns the new path for the host to react to, or `None` when `value` is not one of
    /// the options offered at `level` (the path is left untouched).
    pub fn select(&mut self, value: &str, level: usize) -> Option<SelectionPath> {
        if !self.options_at(level).iter().any(|o| o.value() == value) {
            warn!(
                value = %value,
                level = level,
                path = %self.path,
                "Ignoring selection of a value that is not offered at this level"
            );
            return None;
        }

        self.path.set(level, value);
        debug!(path = %self.path, state = %self.path.state(), "Cascade selection changed");

        Some(self.path.clone())
    }

    /// Reset to no selection and return the (empty) path
    pub fn clear(&mut self) -> SelectionPath {
        self.path.clear();
        debug!("Cascade selection cleared");
        self.path.clone()
    }

    /// Deepest option reached by following `path`
    pub fn resolve_option<S: AsRef<str>>(&self, path: &[S]) -> Option<&CascadeOption> {
        self.options.resolve(path)
    }

    /// Option at the end of the current selection
    pub fn selected_option(&self) -> Option<&CascadeOption> {
        self.options.resolve(self.path.as_slice())
    }

    pub fn is_leaf(option: &CascadeOption) -> bool {
        option.is_leaf()
    }

    /// Labels of the options reached by following `path`, root first
    pub fn label_chain<S: AsRef<str>>(&self, path: &[S]) -> Vec<&str> {
        self.options
            .resolve_chain(path)
            .into_iter()
            .map(CascadeOption::label)
            .collect()
    }

    /// Human-readable rendering of `path`
    pub fn display_text<S: AsRef<str>>(&self, path: &[S]) -> String {
        format_label_chain(&self.label_chain(path))
    }

    /// Human-readable rendering of the current selection
    pub fn current_display_text(&self) -> String {
        self.display_text(self.path.as_slice())
    }
}
