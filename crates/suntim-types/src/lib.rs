//! Core types for SUNTIM.
//!
//! SUNTIM assembles audit-team rosters: every audit object has a fixed
//! catalog of role slots, and people from the personnel roster are placed
//! into them. This crate holds the vocabulary every other crate shares.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  suntim-types   : ids, Role, SlotKey, ErrorCode   ◄── HERE   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  suntim-engine  : assignment table + pure mutation engine   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  suntim-runtime : session, history, gestures, config, files │
//! ├─────────────────────────────────────────────────────────────┤
//! │  suntim-cli     : command-line driver                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use suntim_types::{ObjectId, PersonId, Role, SlotKey};
//!
//! let key = SlotKey::new("obj1", Role::At, 2);
//! assert_eq!(key.object, ObjectId::from("obj1"));
//! assert_eq!(key.to_string(), "obj1:AT:2");
//!
//! let person = PersonId::from("p1");
//! assert_eq!(person.as_str(), "p1");
//! ```

mod error;
mod id;
mod role;
mod slot;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ObjectId, PersonId};
pub use role::{ParseRoleError, Role};
pub use slot::{ParseSlotKeyError, SlotKey};
