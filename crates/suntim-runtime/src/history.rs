//! Bounded undo/redo history.
//!
//! # State
//!
//! ```text
//!  snapshots:  [ S0 | S1 | S2 | S3 ]
//!                          ▲
//!                       pointer        undo → S1, redo → S3
//! ```
//!
//! - `record` drops everything after the pointer, appends, and evicts the
//!   oldest snapshot once the capacity is exceeded.
//! - `undo` / `redo` move the pointer; at either bound they return `None`
//!   and change nothing.
//!
//! There is always at least one snapshot: the baseline.

use std::collections::VecDeque;
use suntim_engine::{MutationKind, RosterState, Snapshot};
use tracing::debug;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Snapshot list plus pointer.
///
/// # Example
///
/// ```
/// use suntim_engine::{MutationKind, RosterState, Snapshot};
/// use suntim_runtime::History;
///
/// let mut history = History::new(RosterState::default(), 50);
/// assert!(!history.can_undo());
///
/// history.record(Snapshot::after(MutationKind::AddSlot, RosterState::default()));
/// assert_eq!(history.undo_label(), Some(MutationKind::AddSlot));
/// assert!(history.undo().is_some());
/// assert!(history.undo().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    pointer: usize,
    capacity: usize,
}

impl History {
    /// Creates a history holding only `baseline`. A capacity of 0 is
    /// treated as 1.
    #[must_use]
    pub fn new(baseline: RosterState, capacity: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(capacity.clamp(1, DEFAULT_HISTORY_CAPACITY));
        snapshots.push_back(Snapshot::baseline(baseline));
        Self {
            snapshots,
            pointer: 0,
            capacity: capacity.max(1),
        }
    }

    /// Appends `snapshot` after the pointer, discarding any redo branch.
    pub fn record(&mut self, snapshot: Snapshot) {
        let dropped = self.snapshots.len() - (self.pointer + 1);
        if dropped > 0 {
            debug!(dropped, "history: discarding redo branch");
            self.snapshots.truncate(self.pointer + 1);
        }

        self.snapshots.push_back(snapshot);
        self.pointer = self.snapshots.len() - 1;

        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.pointer -= 1;
            debug!(capacity = self.capacity, "history: evicted oldest snapshot");
        }
    }

    /// Steps back one snapshot.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            debug!("history: nothing to undo");
            return None;
        }
        self.pointer -= 1;
        self.snapshots.get(self.pointer)
    }

    /// Steps forward one snapshot.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            debug!("history: nothing to redo");
            return None;
        }
        self.pointer += 1;
        self.snapshots.get(self.pointer)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.snapshots.len()
    }

    /// Drops everything and starts over from `baseline`.
    pub fn reset(&mut self, baseline: RosterState) {
        self.snapshots.clear();
        self.snapshots.push_back(Snapshot::baseline(baseline));
        self.pointer = 0;
    }

    /// The snapshot under the pointer.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.pointer)
    }

    /// What an undo would revert.
    #[must_use]
    pub fn undo_label(&self) -> Option<MutationKind> {
        if self.can_undo() {
            self.current().and_then(Snapshot::cause)
        } else {
            None
        }
    }

    /// What a redo would re-apply.
    #[must_use]
    pub fn redo_label(&self) -> Option<MutationKind> {
        self.snapshots
            .get(self.pointer + 1)
            .and_then(Snapshot::cause)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer position, 0 being the oldest kept snapshot.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pointer
    }
}
