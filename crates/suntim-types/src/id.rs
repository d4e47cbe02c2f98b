//! Identifier types for SUNTIM.
//!
//! Identifiers are opaque strings chosen by the surrounding application
//! (`"obj1"`, `"p7"`, `"imp1712345678"`). The engine only compares them;
//! it never generates or parses them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an audit object (an audit target that needs a team).
///
/// # Example
///
/// ```
/// use suntim_types::ObjectId;
///
/// let id = ObjectId::from("obj1");
/// assert_eq!(id.as_str(), "obj1");
/// assert_eq!(id.to_string(), "obj1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

/// Identifier of a person on the personnel roster (an examiner).
///
/// The engine never mutates person records; it only stores this id in
/// the assignment table.
///
/// # Example
///
/// ```
/// use suntim_types::PersonId;
///
/// let a = PersonId::from("p1");
/// let b = PersonId::new(String::from("p1"));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(ObjectId);
string_id!(PersonId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&PersonId::from("p1")).expect("serialize person id");
        assert_eq!(json, "\"p1\"");

        let id: ObjectId = serde_json::from_str("\"obj2\"").expect("deserialize object id");
        assert_eq!(id, ObjectId::from("obj2"));
    }

    #[test]
    fn ids_order_lexically() {
        let mut ids = vec![ObjectId::from("obj2"), ObjectId::from("obj1")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "obj1");
    }
}
