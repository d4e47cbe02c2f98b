//! SUNTIM Runtime - the interactive session layer.
//!
//! The engine crate is a set of pure functions over a roster. This crate
//! owns the mutable side of an editing session around it.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  suntim-types  : ObjectId, PersonId, Role, SlotKey,         │
//! │                  ErrorCode                                  │
//! │  suntim-engine : AssignmentTable, RosterState, Mutation,    │
//! │                  apply(), Snapshot                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RosterSession  : live state + roster + history             │
//! │  History        : bounded undo/redo snapshots               │
//! │  DragController : drag gesture → Mutation                   │
//! │  CommandMenu    : slot menu FSM → Mutation                  │
//! │  config/        : layered TOML configuration                │
//! │  project/       : .suntim documents and their storage       │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                            │
//! │  (suntim-cli)                                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`config`] - Configuration Management
//!
//! - [`SuntimConfig`](config::SuntimConfig): Unified configuration type
//! - [`ConfigLoader`](config::ConfigLoader): Multi-source config loader
//!
//! Configuration priority: Environment > Project > Global > Default
//!
//! ## [`project`] - Project Persistence
//!
//! - [`ProjectDocument`](project::ProjectDocument): the saved roster
//! - [`ProjectStore`](project::ProjectStore): atomic save, load, listing
//!
//! # Example
//!
//! ```
//! use suntim_engine::{AuditObject, Person, RosterState};
//! use suntim_runtime::config::SuntimConfig;
//! use suntim_runtime::{DragController, DropTarget, RosterSession};
//! use suntim_types::{PersonId, Role, SlotKey};
//!
//! let state = RosterState::new(vec![AuditObject::new("O1", "Bali").with_capacity(Role::At, 2)]);
//! let mut session = RosterSession::new(state, vec![Person::new("p1", "Budi")], &SuntimConfig::default())?;
//! let mut drag = DragController::new();
//!
//! drag.begin(PersonId::from("p1"), None);
//! if let Some(m) = drag.drop_on(DropTarget::Slot(SlotKey::new("O1", Role::At, 1)), session.state()) {
//!     session.apply(m)?;
//! }
//! assert_eq!(session.unassigned().len(), 0);
//! # Ok::<(), suntim_runtime::SessionError>(())
//! ```

pub mod config;
mod drag;
mod history;
mod menu;
pub mod project;
mod session;

pub use drag::{slot_insertions, DragController, DragState, DropTarget, SlotInsertion};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use menu::{CommandMenu, MenuAction, MenuOutcome, MenuState};
pub use session::{RosterSession, SessionError, SessionStatus};
