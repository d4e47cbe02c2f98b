//! Composite slot addresses.

use crate::{ObjectId, Role};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address of one slot: `(object, role, ordinal)`.
///
/// Ordering is object first, then catalog role order, then ordinal, so a
/// `BTreeMap<SlotKey, _>` iterates each team in display order.
///
/// The textual form is `"{object}:{role}:{ordinal}"`. It is also the
/// serde representation, which lets slot keys key a JSON object.
///
/// # Example
///
/// ```
/// use suntim_types::{Role, SlotKey};
///
/// let key = SlotKey::new("obj1", Role::Kt, 0);
/// assert_eq!(key.to_string(), "obj1:KT:0");
/// assert_eq!("obj1:KT:0".parse::<SlotKey>(), Ok(key));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    /// Audit object holding the slot.
    pub object: ObjectId,
    /// Role of the slot.
    pub role: Role,
    /// Zero-based position within `(object, role)`.
    pub ordinal: usize,
}

impl SlotKey {
    /// Creates a slot key.
    #[must_use]
    pub fn new(object: impl Into<ObjectId>, role: Role, ordinal: usize) -> Self {
        Self {
            object: object.into(),
            role,
            ordinal,
        }
    }

    /// Returns the same `(object, role)` at another ordinal.
    #[must_use]
    pub fn with_ordinal(&self, ordinal: usize) -> Self {
        Self {
            object: self.object.clone(),
            role: self.role,
            ordinal,
        }
    }

    /// Returns `true` if both keys address the same `(object, role)` list.
    #[must_use]
    pub fn same_list(&self, other: &Self) -> bool {
        self.object == other.object && self.role == other.role
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.object, self.role.key(), self.ordinal)
    }
}

/// Returned when a string is not a valid slot key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid slot key '{input}': {reason}")]
pub struct ParseSlotKeyError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl FromStr for SlotKey {
    type Err = ParseSlotKeyError;

    /// Splits on the last two colons; object ids may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseSlotKeyError {
            input: s.to_string(),
            reason,
        };

        let mut parts = s.rsplitn(3, ':');
        let ordinal = parts.next().ok_or_else(|| fail("missing ordinal"))?;
        let role = parts.next().ok_or_else(|| fail("missing role"))?;
        let object = parts.next().ok_or_else(|| fail("missing object"))?;

        if object.is_empty() {
            return Err(fail("empty object id"));
        }
        let role = role.parse::<Role>().map_err(|_| fail("unknown role"))?;
        let ordinal = ordinal
            .parse::<usize>()
            .map_err(|_| fail("ordinal is not a non-negative integer"))?;

        Ok(Self::new(object, role, ordinal))
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotKeyVisitor;

        impl Visitor<'_> for SlotKeyVisitor {
            type Value = SlotKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a slot key of the form \"object:ROLE:ordinal\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SlotKey, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SlotKeyVisitor)
    }
}
