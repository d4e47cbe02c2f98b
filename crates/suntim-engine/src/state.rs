//! The `(objects, assignments)` pair every mutation transforms.

use crate::schema::{AuditObject, Person};
use crate::table::AssignmentTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use suntim_types::{ObjectId, PersonId, Role, SlotKey};
use thiserror::Error;

/// Schema plus assignment table.
///
/// Cloning is a full deep copy; snapshots rely on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterState {
    pub objects: Vec<AuditObject>,
    #[serde(default)]
    pub assignments: AssignmentTable,
}

/// A broken invariant found by [`RosterState::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The same person holds more than one slot.
    #[error("{person} holds {} slots", slots.len())]
    DuplicatePerson {
        person: PersonId,
        slots: Vec<SlotKey>,
    },

    /// A filled slot lies beyond its role capacity.
    #[error("slot {slot} is outside capacity {capacity}")]
    OutOfRange { slot: SlotKey, capacity: usize },

    /// A filled slot names an object that does not exist.
    #[error("slot {0} refers to an unknown object")]
    UnknownObject(SlotKey),
}

impl RosterState {
    #[must_use]
    pub fn new(objects: Vec<AuditObject>) -> Self {
        Self {
            objects,
            assignments: AssignmentTable::new(),
        }
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&AuditObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub(crate) fn object_mut(&mut self, id: &ObjectId) -> Option<&mut AuditObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    /// Capacity of `(object, role)`, `None` for an unknown object.
    #[must_use]
    pub fn capacity(&self, object: &ObjectId, role: Role) -> Option<usize> {
        self.object(object).map(|o| o.capacity(role))
    }

    /// Every slot of `object` in role then ordinal order, filled or not.
    #[must_use]
    pub fn slots(&self, object: &ObjectId) -> Vec<(SlotKey, Option<&PersonId>)> {
        let Some(obj) = self.object(object) else {
            return Vec::new();
        };
        Role::ALL
            .into_iter()
            .flat_map(|role| {
                (0..obj.capacity(role)).map(move |ordinal| SlotKey::new(obj.id.clone(), role, ordinal))
            })
            .map(|key| {
                let holder = self.assignments.get(&key);
                (key, holder)
            })
            .collect()
    }

    /// Occupants of `object` in print order.
    #[must_use]
    pub fn team(&self, object: &ObjectId) -> Vec<(Role, &PersonId)> {
        Role::ALL
            .into_iter()
            .flat_map(|role| {
                self.assignments
                    .occupied(object, role)
                    .map(move |(_, person)| (role, person))
            })
            .collect()
    }

    /// Active people holding no slot, in roster order.
    #[must_use]
    pub fn unassigned<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        people
            .iter()
            .filter(|p| p.active && !self.assignments.contains_person(&p.id))
            .collect()
    }

    #[must_use]
    pub fn is_contiguous(&self, object: &ObjectId, role: Role) -> bool {
        self.assignments.is_contiguous(object, role)
    }

    /// Checks uniqueness and range validity over the whole table.
    ///
    /// # Errors
    ///
    /// Every violation found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        let mut holders: BTreeMap<&PersonId, Vec<SlotKey>> = BTreeMap::new();

        for (key, person) in self.assignments.iter() {
            holders.entry(person).or_default().push(key.clone());
            match self.capacity(&key.object, key.role) {
                None => violations.push(InvariantViolation::UnknownObject(key.clone())),
                Some(capacity) if key.ordinal >= capacity => {
                    violations.push(InvariantViolation::OutOfRange {
                        slot: key.clone(),
                        capacity,
                    });
                }
                Some(_) => {}
            }
        }

        violations.extend(
            holders
                .into_iter()
                .filter(|(_, slots)| slots.len() > 1)
                .map(|(person, slots)| InvariantViolation::DuplicatePerson {
                    person: person.clone(),
                    slots,
                }),
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RosterState {
        RosterState::new(vec![AuditObject::new("obj1", "Bali")
            .with_capacity(Role::Pj, 1)
            .with_capacity(Role::At, 2)])
    }

    #[test]
    fn slots_list_every_position() {
        let mut s = state();
        s.assignments
            .put_raw(SlotKey::new("obj1", Role::At, 1), PersonId::from("p1"));

        let slots = s.slots(&ObjectId::from("obj1"));
        let rendered: Vec<String> = slots
            .iter()
            .map(|(k, p)| format!("{k}={}", p.map_or("-", |p| p.as_str())))
            .collect();
        assert_eq!(rendered, ["obj1:PJ:0=-", "obj1:AT:0=-", "obj1:AT:1=p1"]);
    }

    #[test]
    fn unassigned_skips_inactive_and_placed() {
        let mut s = state();
        s.assignments
            .put_raw(SlotKey::new("obj1", Role::Pj, 0), PersonId::from("p1"));
        let people = vec![
            Person::new("p1", "A"),
            Person::new("p2", "B").inactive(),
            Person::new("p3", "C"),
        ];
        let pool: Vec<&str> = s.unassigned(&people).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(pool, ["p3"]);
    }

    #[test]
    fn validate_reports_all_violations() {
        let mut s = state();
        s.assignments
            .put_raw(SlotKey::new("obj1", Role::At, 0), PersonId::from("p1"));
        s.assignments
            .put_raw(SlotKey::new("obj1", Role::At, 1), PersonId::from("p1"));
        s.assignments
            .put_raw(SlotKey::new("obj1", Role::Kt, 0), PersonId::from("p2"));
        s.assignments
            .put_raw(SlotKey::new("ghost", Role::Kt, 0), PersonId::from("p3"));

        let violations = s.validate().expect_err("state is invalid");
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&InvariantViolation::OutOfRange {
            slot: SlotKey::new("obj1", Role::Kt, 0),
            capacity: 0,
        }));
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::DuplicatePerson { slots, .. } if slots.len() == 2)));
    }

    #[test]
    fn empty_state_is_valid() {
        assert_eq!(state().validate(), Ok(()));
    }
}
