//! Popover picker that auto-closes shortly after a leaf is chosen

use std::time::Duration;

use tracing::debug;

use super::path::SelectionPath;
use super::tree::CascadeTree;
use crate::domain::clock::{Clock, DebounceTimer};

/// Default delay between a leaf selection and the popover closing
pub const DEFAULT_AUTO_CLOSE_DELAY: Duration = Duration::from_millis(150);

/// A cascade tree wrapped in popover state.
///
/// Selecting a leaf arms a debounced close so the selection renders before the popover is
/// dismissed; selecting an internal node keeps the popover open for further drill-down. Any
/// later successful selection supersedes a pending close. The host drives the close by
/// calling [`CascadePicker::poll`] from its update cycle.
#[derive(Debug)]
pub struct CascadePicker<C: Clock> {
    tree: CascadeTree,
    clock: C,
    auto_close: DebounceTimer,
    open: bool,
}

impl<C: Clock> CascadePicker<C> {
    pub fn new(tree: CascadeTree, clock: C) -> Self {
        Self::with_delay(tree, clock, DEFAULT_AUTO_CLOSE_DELAY)
    }

    pub fn with_delay(tree: CascadeTree, clock: C, delay: Duration) -> Self {
        Self {
            tree,
            clock,
            auto_close: DebounceTimer::new(delay),
            open: false,
        }
    }

    pub fn tree(&self) -> &CascadeTree {
        &self.tree
    }

    pub fn path(&self) -> &SelectionPath {
        self.tree.path()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while a leaf selection is waiting to close the popover
    pub fn is_close_pending(&self) -> bool {
        self.auto_close.is_pending()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close immediately, discarding any pending auto-close
    pub fn close(&mut self) {
        self.auto_close.cancel();
        self.open = false;
    }

    /// Select through the underlying tree and arm the auto-close for leaves
    pub fn select(&mut self, value: &str, level: usize) -> Option<SelectionPath> {
        let path = self.tree.select(value, level)?;

        self.auto_close.cancel();

        if self.tree.selected_option().is_some_and(CascadeTree::is_leaf) {
            self.auto_close.schedule(self.clock.now());
            debug!(
                delay_ms = self.auto_close.delay().as_millis() as u64,
                "Leaf selected, popover close scheduled"
            );
        }

        Some(path)
    }

    pub fn clear(&mut self) -> SelectionPath {
        self.auto_close.cancel();
        self.tree.clear()
    }

    /// Close the popover if a scheduled auto-close is due. Returns whether it closed.
    pub fn poll(&mut self) -> bool {
        if !self.auto_close.fire_if_due(self.clock.now()) {
            return false;
        }

        let was_open = self.open;
        self.open = false;
        debug!("Popover auto-closed after leaf selection");
        was_open
    }

    pub fn display_text(&self) -> String {
        self.tree.current_display_text()
    }
}
