//! Immutable state snapshots for undo/redo.
//!
//! A [`Snapshot`] owns a deep copy of a [`RosterState`]; nothing in it
//! aliases the live session state, so later mutations cannot reach back
//! into history.
//!
//! # Example
//!
//! ```
//! use suntim_engine::{MutationKind, RosterState, Snapshot};
//!
//! let base = Snapshot::baseline(RosterState::default());
//! assert_eq!(base.cause(), None);
//!
//! let next = Snapshot::after(MutationKind::Assign, RosterState::default());
//! assert_eq!(next.cause(), Some(MutationKind::Assign));
//! ```

use crate::mutation::MutationKind;
use crate::state::RosterState;
use serde::{Deserialize, Serialize};

/// A recorded state plus the mutation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    state: RosterState,
    /// `None` for a baseline (session start or load).
    cause: Option<MutationKind>,
}

impl Snapshot {
    #[must_use]
    pub fn baseline(state: RosterState) -> Self {
        Self { state, cause: None }
    }

    #[must_use]
    pub fn after(cause: MutationKind, state: RosterState) -> Self {
        Self {
            state,
            cause: Some(cause),
        }
    }

    #[must_use]
    pub fn state(&self) -> &RosterState {
        &self.state
    }

    #[must_use]
    pub fn cause(&self) -> Option<MutationKind> {
        self.cause
    }

    #[must_use]
    pub fn into_state(self) -> RosterState {
        self.state
    }
}
