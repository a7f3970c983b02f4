//! Poll loop state for interactive front ends.
//!
//! A front end runs three stages per tick: input (moves the [`ViewState`]),
//! update ([`PollContext::poll`] fetches and decodes a fresh snapshot) and
//! render (reads the latest snapshot). Snapshots are published whole behind
//! an `Arc`, so a renderer never sees a half-updated module.

use std::sync::Arc;

use crate::inspect::{InspectError, ModuleSnapshot, inspect};
use crate::source::TwoWireBus;

/// Selection and scroll position over a list of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub selected: usize,
    pub scroll: usize,
    entry_count: usize,
    visible_rows: usize,
}

impl ViewState {
    pub fn new(entry_count: usize, visible_rows: usize) -> Self {
        Self {
            selected: 0,
            scroll: 0,
            entry_count,
            visible_rows: visible_rows.max(1),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Changes the number of entries, clamping the selection.
    pub fn set_entry_count(&mut self, entry_count: usize) {
        self.entry_count = entry_count;
        self.selected = self.selected.min(entry_count.saturating_sub(1));
        self.follow_selection();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entry_count {
            self.selected += 1;
            self.follow_selection();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.follow_selection();
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    fn follow_selection(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.visible_rows {
            self.scroll = self.selected + 1 - self.visible_rows;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Owns the view state and the latest published snapshot.
#[derive(Debug, Default)]
pub struct PollContext {
    pub view: ViewState,
    snapshot: Option<Arc<ModuleSnapshot>>,
    polls: u64,
    failures: u64,
}

impl PollContext {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Update stage. On failure the previous snapshot stays published.
    pub fn poll<B: TwoWireBus + ?Sized>(
        &mut self,
        bus: &mut B,
    ) -> Result<Arc<ModuleSnapshot>, InspectError> {
        self.poll_with(bus, inspect)
    }

    /// Update stage with a caller-chosen reader, e.g. [`inspect_identity`]
    /// for sources that only serve A0h.
    ///
    /// [`inspect_identity`]: crate::inspect_identity
    pub fn poll_with<B, F>(
        &mut self,
        bus: &mut B,
        read: F,
    ) -> Result<Arc<ModuleSnapshot>, InspectError>
    where
        B: TwoWireBus + ?Sized,
        F: FnOnce(&mut B) -> Result<ModuleSnapshot, InspectError>,
    {
        self.polls += 1;
        match read(bus) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(err) => {
                self.failures += 1;
                log::warn!("poll {} failed: {err}", self.polls);
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Option<Arc<ModuleSnapshot>> {
        self.snapshot.clone()
    }

    /// Render stage. Returns `None` until a poll has succeeded.
    pub fn render<R>(&self, render: impl FnOnce(&ModuleSnapshot, &ViewState) -> R) -> Option<R> {
        self.snapshot
            .as_deref()
            .map(|snapshot| render(snapshot, &self.view))
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
