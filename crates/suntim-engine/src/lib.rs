//! Slot-assignment engine for SUNTIM.
//!
//! A pure function library over an explicit [`RosterState`]: the audit
//! objects with their per-role slot capacities, plus the sparse
//! [`AssignmentTable`] of who sits where. Nothing here holds global state;
//! the caller owns the state and decides what to keep for undo.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  suntim-types   : ids, Role, SlotKey, ErrorCode              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  suntim-engine  : assignment table + mutations   ◄── HERE    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  suntim-runtime : session, history, gestures, config, files │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `schema` | [`AuditObject`], [`Person`] |
//! | `table` | [`AssignmentTable`] pure primitives |
//! | `state` | [`RosterState`] queries and [`InvariantViolation`] checks |
//! | `mutation` | one function per user action, [`Mutation`], [`apply`] |
//! | `snapshot` | [`Snapshot`] for history |
//! | `error` | [`EngineError`] |
//!
//! # Example
//!
//! ```
//! use suntim_engine::{apply, AuditObject, Mutation, RelocateMode, RosterState};
//! use suntim_types::{PersonId, Role, SlotKey};
//!
//! let state = RosterState::new(vec![
//!     AuditObject::new("O1", "Bali").with_capacity(Role::Kt, 1),
//!     AuditObject::new("O2", "Badung").with_capacity(Role::Kt, 2),
//! ]);
//!
//! let state = apply(&state, &Mutation::Assign {
//!     slot: SlotKey::new("O1", Role::Kt, 0),
//!     person: PersonId::from("p1"),
//! })?;
//! let state = apply(&state, &Mutation::Relocate {
//!     person: PersonId::from("p1"),
//!     from: Some(SlotKey::new("O1", Role::Kt, 0)),
//!     to: SlotKey::new("O2", Role::Kt, 0),
//!     mode: RelocateMode::InsertShift,
//! })?;
//!
//! assert_eq!(state.validate(), Ok(()));
//! assert!(state.assignments.find(&"O1".into(), Role::Kt, 0).is_none());
//! # Ok::<(), suntim_engine::EngineError>(())
//! ```

mod error;
mod mutation;
mod schema;
mod snapshot;
mod state;
mod table;

pub use error::EngineError;
pub use mutation::{
    add_slot, apply, assign_to_empty_slot, change_role, delete_slot, insert_object,
    move_to_object, relocate, remove_object, set_capacity, sort_teams, swap_with, unassign,
    CapacityGrowth, Mutation, MutationKind, RelocateMode,
};
pub use schema::{AuditObject, Person};
pub use snapshot::Snapshot;
pub use state::{InvariantViolation, RosterState};
pub use table::AssignmentTable;
