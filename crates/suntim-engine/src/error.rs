//! Engine errors.
//!
//! Every mutation either returns the next state or one of these errors;
//! a failed mutation never leaves a partially applied state behind.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`SlotOccupied`](EngineError::SlotOccupied) | `ENGINE_SLOT_OCCUPIED` | Yes |
//! | [`SlotOutOfRange`](EngineError::SlotOutOfRange) | `ENGINE_SLOT_OUT_OF_RANGE` | No |
//! | [`UnknownObject`](EngineError::UnknownObject) | `ENGINE_UNKNOWN_OBJECT` | No |
//! | [`CapacityFull`](EngineError::CapacityFull) | `ENGINE_CAPACITY_FULL` | Yes |
//! | [`SlotEmpty`](EngineError::SlotEmpty) | `ENGINE_SLOT_EMPTY` | No |
//! | [`SourceMismatch`](EngineError::SourceMismatch) | `ENGINE_SOURCE_MISMATCH` | No |
//! | [`PersonNotPlaced`](EngineError::PersonNotPlaced) | `ENGINE_PERSON_NOT_PLACED` | No |
//! | [`DuplicateObject`](EngineError::DuplicateObject) | `ENGINE_DUPLICATE_OBJECT` | No |
//!
//! # Example
//!
//! ```
//! use suntim_engine::EngineError;
//! use suntim_types::{ErrorCode, PersonId, Role, SlotKey};
//!
//! let err = EngineError::SlotOccupied {
//!     slot: SlotKey::new("obj1", Role::Kt, 0),
//!     occupant: PersonId::from("p1"),
//! };
//! assert_eq!(err.code(), "ENGINE_SLOT_OCCUPIED");
//! assert!(err.is_recoverable());
//! ```

use suntim_types::{ErrorCode, ObjectId, PersonId, Role, SlotKey};
use thiserror::Error;

/// Mutation engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The operation requires an empty slot but someone holds it.
    ///
    /// The caller recovers by choosing swap semantics instead.
    #[error("slot {slot} is occupied by {occupant}")]
    SlotOccupied { slot: SlotKey, occupant: PersonId },

    /// Ordinal outside the current capacity of its object and role.
    ///
    /// A caller contract violation, typically a stale UI reference.
    #[error("slot {slot} is outside capacity {capacity}")]
    SlotOutOfRange { slot: SlotKey, capacity: usize },

    /// No object with this id exists.
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),

    /// The target role has no empty ordinal and growth was not allowed.
    #[error("role {role} of {object} is full ({capacity} slots)")]
    CapacityFull {
        object: ObjectId,
        role: Role,
        capacity: usize,
    },

    /// The operation needs an occupied slot but it is empty.
    #[error("slot {0} is empty")]
    SlotEmpty(SlotKey),

    /// The source slot does not hold the person being moved.
    #[error("slot {slot} does not hold {person}")]
    SourceMismatch { slot: SlotKey, person: PersonId },

    /// The person holds no slot anywhere.
    #[error("{0} is not placed in any slot")]
    PersonNotPlaced(PersonId),

    /// An object with this id already exists.
    #[error("object {0} already exists")]
    DuplicateObject(ObjectId),
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::SlotOccupied { .. } => "ENGINE_SLOT_OCCUPIED",
            Self::SlotOutOfRange { .. } => "ENGINE_SLOT_OUT_OF_RANGE",
            Self::UnknownObject(_) => "ENGINE_UNKNOWN_OBJECT",
            Self::CapacityFull { .. } => "ENGINE_CAPACITY_FULL",
            Self::SlotEmpty(_) => "ENGINE_SLOT_EMPTY",
            Self::SourceMismatch { .. } => "ENGINE_SOURCE_MISMATCH",
            Self::PersonNotPlaced(_) => "ENGINE_PERSON_NOT_PLACED",
            Self::DuplicateObject(_) => "ENGINE_DUPLICATE_OBJECT",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::SlotOccupied { .. } | Self::CapacityFull { .. })
    }
}
