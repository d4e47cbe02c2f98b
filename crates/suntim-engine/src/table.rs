//! The sparse assignment table.
//!
//! Maps filled [`SlotKey`]s to the [`PersonId`] holding them. Empty slots
//! are simply absent. Keys sort by object, role order and ordinal, so a
//! range over one `(object, role)` yields its occupants in ordinal order.
//!
//! The public primitives are pure: they return a new table and leave the
//! receiver untouched. The mutation engine composes the crate-private
//! `*_mut` variants on its own working copy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use suntim_types::{ObjectId, PersonId, Role, SlotKey};

/// Sparse mapping from slot to person.
///
/// A person appears at most once: [`place`](Self::place) vacates any
/// previous slot of the person before writing the new one.
///
/// # Example
///
/// ```
/// use suntim_engine::AssignmentTable;
/// use suntim_types::{PersonId, Role, SlotKey};
///
/// let p1 = PersonId::from("p1");
/// let table = AssignmentTable::new()
///     .place(SlotKey::new("obj1", Role::At, 0), p1.clone())
///     .place(SlotKey::new("obj1", Role::At, 1), p1.clone());
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.find_slot_of(&p1), Some(&SlotKey::new("obj1", Role::At, 1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentTable {
    slots: BTreeMap<SlotKey, PersonId>,
}

impl AssignmentTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates filled slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &PersonId)> {
        self.slots.iter()
    }

    #[must_use]
    pub fn get(&self, key: &SlotKey) -> Option<&PersonId> {
        self.slots.get(key)
    }

    #[must_use]
    pub fn find(&self, object: &ObjectId, role: Role, ordinal: usize) -> Option<&PersonId> {
        self.slots.get(&SlotKey::new(object.clone(), role, ordinal))
    }

    /// Linear scan for the slot holding `person`.
    #[must_use]
    pub fn find_slot_of(&self, person: &PersonId) -> Option<&SlotKey> {
        self.slots
            .iter()
            .find_map(|(key, holder)| (holder == person).then_some(key))
    }

    #[must_use]
    pub fn contains_person(&self, person: &PersonId) -> bool {
        self.find_slot_of(person).is_some()
    }

    /// Occupied slots of one `(object, role)`, in ordinal order.
    pub fn occupied(
        &self,
        object: &ObjectId,
        role: Role,
    ) -> impl Iterator<Item = (usize, &PersonId)> {
        let lo = SlotKey::new(object.clone(), role, 0);
        let hi = SlotKey::new(object.clone(), role, usize::MAX);
        self.slots
            .range(lo..=hi)
            .map(|(key, person)| (key.ordinal, person))
    }

    /// Occupants of one `(object, role)` in ordinal order, holes skipped.
    #[must_use]
    pub fn occupants(&self, object: &ObjectId, role: Role) -> Vec<PersonId> {
        self.occupied(object, role)
            .map(|(_, person)| person.clone())
            .collect()
    }

    /// Lowest empty ordinal below `capacity`.
    #[must_use]
    pub fn first_empty(&self, object: &ObjectId, role: Role, capacity: usize) -> Option<usize> {
        (0..capacity).find(|&ordinal| self.find(object, role, ordinal).is_none())
    }

    /// Whether the occupied ordinals of `(object, role)` are exactly `0..n`.
    #[must_use]
    pub fn is_contiguous(&self, object: &ObjectId, role: Role) -> bool {
        self.occupied(object, role)
            .enumerate()
            .all(|(expected, (ordinal, _))| expected == ordinal)
    }

    /// Returns a table with `person` in `key` and nowhere else.
    #[must_use]
    pub fn place(&self, key: SlotKey, person: PersonId) -> Self {
        let mut next = self.clone();
        next.place_mut(key, person);
        next
    }

    /// Returns a table without `key`. Idempotent.
    #[must_use]
    pub fn vacate(&self, key: &SlotKey) -> Self {
        let mut next = self.clone();
        next.vacate_mut(key);
        next
    }

    /// Returns a table whose `(object, role)` occupants sit at `0..n`,
    /// keeping their relative order.
    ///
    /// Compaction only lowers ordinals, so it cannot push anyone past the
    /// role capacity.
    #[must_use]
    pub fn compact(&self, object: &ObjectId, role: Role) -> Self {
        let mut next = self.clone();
        next.compact_mut(object, role);
        next
    }

    /// Writes `person` into `key`, vacating their previous slot.
    ///
    /// Returns the slot the person left, if any. Whoever held `key` before
    /// is overwritten; callers decide what happens to them first.
    pub(crate) fn place_mut(&mut self, key: SlotKey, person: PersonId) -> Option<SlotKey> {
        let previous = self.remove_person(&person);
        self.slots.insert(key, person);
        previous
    }

    pub(crate) fn vacate_mut(&mut self, key: &SlotKey) -> Option<PersonId> {
        self.slots.remove(key)
    }

    /// Removes `person` from wherever they are.
    pub(crate) fn remove_person(&mut self, person: &PersonId) -> Option<SlotKey> {
        let key = self.find_slot_of(person)?.clone();
        self.slots.remove(&key);
        Some(key)
    }

    /// Writes a raw entry without the uniqueness sweep.
    ///
    /// Only for moves where both sides are already known to be consistent.
    pub(crate) fn put_raw(&mut self, key: SlotKey, person: PersonId) {
        self.slots.insert(key, person);
    }

    /// Removes every entry of `(object, role)`, returning the occupants in
    /// ordinal order.
    pub(crate) fn take_list(&mut self, object: &ObjectId, role: Role) -> Vec<PersonId> {
        let keys: Vec<SlotKey> = self
            .occupied(object, role)
            .map(|(ordinal, _)| SlotKey::new(object.clone(), role, ordinal))
            .collect();
        keys.iter()
            .filter_map(|key| self.slots.remove(key))
            .collect()
    }

    /// Replaces `(object, role)` with `list` at ordinals `0..list.len()`.
    pub(crate) fn write_list(&mut self, object: &ObjectId, role: Role, list: Vec<PersonId>) {
        self.take_list(object, role);
        for (ordinal, person) in list.into_iter().enumerate() {
            self.slots
                .insert(SlotKey::new(object.clone(), role, ordinal), person);
        }
    }

    pub(crate) fn compact_mut(&mut self, object: &ObjectId, role: Role) {
        let list = self.take_list(object, role);
        self.write_list(object, role, list);
    }

    /// Moves every occupant of `(object, role)` at `>= from` one ordinal up.
    pub(crate) fn shift_up_from(&mut self, object: &ObjectId, role: Role, from: usize) {
        let moving: Vec<usize> = self
            .occupied(object, role)
            .map(|(ordinal, _)| ordinal)
            .filter(|&ordinal| ordinal >= from)
            .collect();
        // highest first so no entry is overwritten
        for ordinal in moving.into_iter().rev() {
            let key = SlotKey::new(object.clone(), role, ordinal);
            if let Some(person) = self.slots.remove(&key) {
                self.slots.insert(key.with_ordinal(ordinal + 1), person);
            }
        }
    }

    /// Moves every occupant of `(object, role)` at `> after` one ordinal down.
    ///
    /// The slot at `after` must already be vacant.
    pub(crate) fn shift_down_after(&mut self, object: &ObjectId, role: Role, after: usize) {
        let moving: Vec<usize> = self
            .occupied(object, role)
            .map(|(ordinal, _)| ordinal)
            .filter(|&ordinal| ordinal > after)
            .collect();
        for ordinal in moving {
            let key = SlotKey::new(object.clone(), role, ordinal);
            if let Some(person) = self.slots.remove(&key) {
                self.slots.insert(key.with_ordinal(ordinal - 1), person);
            }
        }
    }

    /// Removes entries of `(object, role)` at `>= capacity`, returning
    /// the evicted people.
    pub(crate) fn evict_from(
        &mut self,
        object: &ObjectId,
        role: Role,
        capacity: usize,
    ) -> Vec<PersonId> {
        let keys: Vec<SlotKey> = self
            .occupied(object, role)
            .filter(|&(ordinal, _)| ordinal >= capacity)
            .map(|(ordinal, _)| SlotKey::new(object.clone(), role, ordinal))
            .collect();
        keys.iter()
            .filter_map(|key| self.slots.remove(key))
            .collect()
    }

    /// Drops every entry of `object`.
    pub(crate) fn remove_object(&mut self, object: &ObjectId) {
        self.slots.retain(|key, _| &key.object != object);
    }
}
