//! Slot schema: audit objects and the personnel roster.
//!
//! An [`AuditObject`] declares how many slots each [`Role`] has. The slot
//! space of an object is every `(role, ordinal)` with
//! `ordinal < capacity(role)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use suntim_types::{ObjectId, PersonId, Role};

/// An audit target that needs a team.
///
/// A role missing from `slots` has capacity 0.
///
/// # Example
///
/// ```
/// use suntim_engine::AuditObject;
/// use suntim_types::Role;
///
/// let obj = AuditObject::new("obj1", "LKPD Pemprov Bali")
///     .with_capacity(Role::Pj, 1)
///     .with_capacity(Role::At, 6);
///
/// assert_eq!(obj.capacity(Role::At), 6);
/// assert_eq!(obj.capacity(Role::Kt), 0);
/// assert_eq!(obj.total_capacity(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<Role, usize>,
}

impl AuditObject {
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Builder form of [`set_capacity`](Self::set_capacity).
    #[must_use]
    pub fn with_capacity(mut self, role: Role, capacity: usize) -> Self {
        self.set_capacity(role, capacity);
        self
    }

    #[must_use]
    pub fn capacity(&self, role: Role) -> usize {
        self.slots.get(&role).copied().unwrap_or(0)
    }

    pub fn set_capacity(&mut self, role: Role, capacity: usize) {
        self.slots.insert(role, capacity);
    }

    /// Sum of all role capacities.
    #[must_use]
    pub fn total_capacity(&self) -> usize {
        self.slots.values().sum()
    }
}

fn default_active() -> bool {
    true
}

/// An examiner on the personnel roster.
///
/// Only `id` matters to the engine. Inactive people stay on the roster
/// but are not offered in the unassigned pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Person {
    /// Creates an active person.
    #[must_use]
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
        }
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}
