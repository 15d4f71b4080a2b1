//! Selection path value and its derived state

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::MAX_DEPTH;

// ============================================================================
// SelectionPath
// ============================================================================

/// Ordered values chosen in a cascade, `[region?, company?, site?]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPath(Vec<String>);

impl SelectionPath {
    /// An empty path
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == MAX_DEPTH
    }

    /// Value selected at `level`, if any
    pub fn get(&self, level: usize) -> Option<&str> {
        self.0.get(level).map(String::as_str)
    }

    pub fn region(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn company(&self) -> Option<&str> {
        self.get(1)
    }

    pub fn site(&self) -> Option<&str> {
        self.get(2)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn state(&self) -> SelectionState {
        SelectionState::from_depth(self.0.len())
    }

    /// Set `level` to `value` and drop every deeper entry.
    ///
    /// Callers must have checked that `level <= len()` and that `value` is a valid child.
    pub(crate) fn set(&mut self, level: usize, value: impl Into<String>) {
        self.0.truncate(level);
        self.0.push(value.into());
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl AsRef<[String]> for SelectionPath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl From<SelectionPath> for Vec<String> {
    fn from(path: SelectionPath) -> Self {
        path.0
    }
}

impl fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

// ============================================================================
// SelectionState
// ============================================================================

/// Drill-down state of a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "depth", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing selected
    Unselected,
    /// Some but not all levels selected
    Partial(usize),
    /// Every level selected
    Full,
}

impl SelectionState {
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => Self::Unselected,
            d if d >= MAX_DEPTH => Self::Full,
            d => Self::Partial(d),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Unselected => 0,
            Self::Partial(depth) => *depth,
            Self::Full => MAX_DEPTH,
        }
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unselected => write!(f, "unselected"),
            Self::Partial(depth) => write!(f, "partial({})", depth),
            Self::Full => write!(f, "full"),
        }
    }
}
