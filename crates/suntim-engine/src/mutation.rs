//! The mutation engine.
//!
//! One pure function per user-visible action. Each takes the current
//! [`RosterState`] and returns the next one, or an [`EngineError`] with
//! the input left as it was. Composite steps run on a private working copy,
//! so a rejected operation never leaks a half-applied table.
//!
//! # Invariants
//!
//! Every successful operation leaves:
//!
//! - each person in at most one slot,
//! - every filled ordinal below its role capacity,
//! - the affected `(object, role)` contiguous from zero after slot insertion,
//!   slot deletion, shift-insert relocation and capacity changes.
//!
//! [`add_slot`] is the one deliberate exception: it opens an empty ordinal
//! at the insertion point for the next assignment.

use crate::error::EngineError;
use crate::schema::AuditObject;
use crate::state::RosterState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use suntim_types::{ObjectId, PersonId, Role, SlotKey};
use tracing::debug;

/// How a relocation treats the target ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocateMode {
    /// The target slot's occupant, if any, trades places with the mover.
    Swap,
    /// The target ordinal is an insertion point into the compacted list.
    InsertShift,
}

/// Whether a placement may add a slot when the target role is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityGrowth {
    #[default]
    Allow,
    Deny,
}

/// A mutation request, as recorded in scripts and produced by gestures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Assign {
        slot: SlotKey,
        person: PersonId,
    },
    Relocate {
        person: PersonId,
        /// `None` when the person comes from the unassigned pool.
        from: Option<SlotKey>,
        to: SlotKey,
        mode: RelocateMode,
    },
    Unassign {
        slot: SlotKey,
    },
    ChangeRole {
        person: PersonId,
        from: SlotKey,
        role: Role,
        #[serde(default)]
        growth: CapacityGrowth,
    },
    MoveToObject {
        person: PersonId,
        from: SlotKey,
        object: ObjectId,
        role: Role,
        #[serde(default)]
        growth: CapacityGrowth,
    },
    SwapWith {
        from: SlotKey,
        other: PersonId,
    },
    AddSlot {
        object: ObjectId,
        role: Role,
        at: usize,
    },
    DeleteSlot {
        object: ObjectId,
        role: Role,
        ordinal: usize,
    },
    SetCapacity {
        object: ObjectId,
        role: Role,
        capacity: usize,
    },
    InsertObject {
        object: AuditObject,
    },
    RemoveObject {
        object: ObjectId,
    },
    SortTeams {
        roster: Vec<PersonId>,
    },
}

/// The kind of a [`Mutation`], without its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Assign,
    Relocate,
    Unassign,
    ChangeRole,
    MoveToObject,
    SwapWith,
    AddSlot,
    DeleteSlot,
    SetCapacity,
    InsertObject,
    RemoveObject,
    SortTeams,
}

impl MutationKind {
    /// Human label, as shown in "undo <label>".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Relocate => "move",
            Self::Unassign => "release",
            Self::ChangeRole => "change role",
            Self::MoveToObject => "move to object",
            Self::SwapWith => "swap",
            Self::AddSlot => "add slot",
            Self::DeleteSlot => "delete slot",
            Self::SetCapacity => "set capacity",
            Self::InsertObject => "add object",
            Self::RemoveObject => "remove object",
            Self::SortTeams => "sort teams",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Mutation {
    #[must_use]
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Assign { .. } => MutationKind::Assign,
            Self::Relocate { .. } => MutationKind::Relocate,
            Self::Unassign { .. } => MutationKind::Unassign,
            Self::ChangeRole { .. } => MutationKind::ChangeRole,
            Self::MoveToObject { .. } => MutationKind::MoveToObject,
            Self::SwapWith { .. } => MutationKind::SwapWith,
            Self::AddSlot { .. } => MutationKind::AddSlot,
            Self::DeleteSlot { .. } => MutationKind::DeleteSlot,
            Self::SetCapacity { .. } => MutationKind::SetCapacity,
            Self::InsertObject { .. } => MutationKind::InsertObject,
            Self::RemoveObject { .. } => MutationKind::RemoveObject,
            Self::SortTeams { .. } => MutationKind::SortTeams,
        }
    }
}

/// Runs `mutation` against `state`.
///
/// # Errors
///
/// Whatever the underlying operation rejects.
///
/// # Example
///
/// ```
/// use suntim_engine::{apply, AuditObject, Mutation, RosterState};
/// use suntim_types::{PersonId, Role, SlotKey};
///
/// let state = RosterState::new(vec![AuditObject::new("O1", "Bali").with_capacity(Role::Kt, 1)]);
/// let next = apply(&state, &Mutation::Assign {
///     slot: SlotKey::new("O1", Role::Kt, 0),
///     person: PersonId::from("p1"),
/// })?;
/// assert_eq!(next.assignments.len(), 1);
/// # Ok::<(), suntim_engine::EngineError>(())
/// ```
pub fn apply(state: &RosterState, mutation: &Mutation) -> Result<RosterState, EngineError> {
    debug!(kind = %mutation.kind(), "applying mutation");
    match mutation {
        Mutation::Assign { slot, person } => assign_to_empty_slot(state, slot, person),
        Mutation::Relocate {
            person,
            from,
            to,
            mode,
        } => relocate(state, person, from.as_ref(), to, *mode),
        Mutation::Unassign { slot } => Ok(unassign(state, slot)),
        Mutation::ChangeRole {
            person,
            from,
            role,
            growth,
        } => change_role(state, person, from, *role, *growth),
        Mutation::MoveToObject {
            person,
            from,
            object,
            role,
            growth,
        } => move_to_object(state, person, from, object, *role, *growth),
        Mutation::SwapWith { from, other } => swap_with(state, from, other),
        Mutation::AddSlot { object, role, at } => add_slot(state, object, *role, *at),
        Mutation::DeleteSlot {
            object,
            role,
            ordinal,
        } => delete_slot(state, object, *role, *ordinal),
        Mutation::SetCapacity {
            object,
            role,
            capacity,
        } => set_capacity(state, object, *role, *capacity),
        Mutation::InsertObject { object } => insert_object(state, object.clone()),
        Mutation::RemoveObject { object } => remove_object(state, object),
        Mutation::SortTeams { roster } => Ok(sort_teams(state, roster)),
    }
}

fn capacity_of(state: &RosterState, object: &ObjectId, role: Role) -> Result<usize, EngineError> {
    state
        .capacity(object, role)
        .ok_or_else(|| EngineError::UnknownObject(object.clone()))
}

/// Ensures `key` addresses an existing slot.
fn check_slot(state: &RosterState, key: &SlotKey) -> Result<(), EngineError> {
    let capacity = capacity_of(state, &key.object, key.role)?;
    if key.ordinal >= capacity {
        return Err(EngineError::SlotOutOfRange {
            slot: key.clone(),
            capacity,
        });
    }
    Ok(())
}

/// Ensures `from` currently holds `person`.
fn check_source(state: &RosterState, from: &SlotKey, person: &PersonId) -> Result<(), EngineError> {
    if state.assignments.get(from) == Some(person) {
        Ok(())
    } else {
        Err(EngineError::SourceMismatch {
            slot: from.clone(),
            person: person.clone(),
        })
    }
}

fn set_capacity_mut(
    state: &mut RosterState,
    object: &ObjectId,
    role: Role,
    capacity: usize,
) -> Result<(), EngineError> {
    state
        .object_mut(object)
        .map(|o| o.set_capacity(role, capacity))
        .ok_or_else(|| EngineError::UnknownObject(object.clone()))
}

/// Places `person` into an empty slot.
///
/// If the person already holds another slot, that slot is vacated.
///
/// # Errors
///
/// - [`EngineError::SlotOccupied`] if anyone holds `slot`
/// - [`EngineError::SlotOutOfRange`] / [`EngineError::UnknownObject`] for a bad address
pub fn assign_to_empty_slot(
    state: &RosterState,
    slot: &SlotKey,
    person: &PersonId,
) -> Result<RosterState, EngineError> {
    check_slot(state, slot)?;
    if let Some(occupant) = state.assignments.get(slot) {
        return Err(EngineError::SlotOccupied {
            slot: slot.clone(),
            occupant: occupant.clone(),
        });
    }
    let mut next = state.clone();
    next.assignments.place_mut(slot.clone(), person.clone());
    Ok(next)
}

/// Moves `person` from `from` to `to`.
///
/// `from == None` means the person comes from the unassigned pool; there
/// is nothing to vacate, and with [`RelocateMode::Swap`] a displaced
/// occupant goes back to the pool. A person who does hold a slot is moved
/// from that slot instead.
///
/// With [`RelocateMode::InsertShift`] the insertion index is computed
/// after the mover has left their source, then clamped to the length of
/// the compacted list. `to.ordinal` may equal the capacity (the gap after
/// the last slot).
///
/// # Errors
///
/// - [`EngineError::SourceMismatch`] if `from` does not hold `person`
/// - [`EngineError::SlotOutOfRange`] / [`EngineError::UnknownObject`] for a bad target
/// - [`EngineError::CapacityFull`] if a shift-insert would overflow the role
pub fn relocate(
    state: &RosterState,
    person: &PersonId,
    from: Option<&SlotKey>,
    to: &SlotKey,
    mode: RelocateMode,
) -> Result<RosterState, EngineError> {
    let from = match from {
        Some(from) => {
            check_source(state, from, person)?;
            Some(from)
        }
        None => state.assignments.find_slot_of(person),
    };
    match mode {
        RelocateMode::Swap => relocate_swap(state, person, from, to),
        RelocateMode::InsertShift => relocate_insert(state, person, from, to),
    }
}

fn relocate_swap(
    state: &RosterState,
    person: &PersonId,
    from: Option<&SlotKey>,
    to: &SlotKey,
) -> Result<RosterState, EngineError> {
    check_slot(state, to)?;
    let occupant = state.assignments.get(to);
    if occupant == Some(person) {
        return Ok(state.clone());
    }

    let mut next = state.clone();
    if let Some(from) = from {
        next.assignments.vacate_mut(from);
    }
    if let Some(occupant) = occupant {
        next.assignments.vacate_mut(to);
        if let Some(from) = from {
            next.assignments.put_raw(from.clone(), occupant.clone());
        }
    }
    next.assignments.place_mut(to.clone(), person.clone());
    Ok(next)
}

fn relocate_insert(
    state: &RosterState,
    person: &PersonId,
    from: Option<&SlotKey>,
    to: &SlotKey,
) -> Result<RosterState, EngineError> {
    let capacity = capacity_of(state, &to.object, to.role)?;
    if to.ordinal > capacity {
        return Err(EngineError::SlotOutOfRange {
            slot: to.clone(),
            capacity,
        });
    }

    let mut next = state.clone();
    if let Some(from) = from {
        next.assignments.vacate_mut(from);
    }
    next.assignments.remove_person(person);

    let mut list = next.assignments.occupants(&to.object, to.role);
    if list.len() >= capacity {
        return Err(EngineError::CapacityFull {
            object: to.object.clone(),
            role: to.role,
            capacity,
        });
    }
    let index = to.ordinal.min(list.len());
    list.insert(index, person.clone());
    next.assignments.write_list(&to.object, to.role, list);

    // the source list loses a member; close its hole too
    if let Some(from) = from {
        if !from.same_list(to) {
            next.assignments.compact_mut(&from.object, from.role);
        }
    }
    Ok(next)
}

/// Empties `slot`. Succeeds even if it is already empty.
#[must_use]
pub fn unassign(state: &RosterState, slot: &SlotKey) -> RosterState {
    let mut next = state.clone();
    next.assignments.vacate_mut(slot);
    next
}

/// Vacates `from` and places `person` in the first empty ordinal of
/// `role` in `object`.
///
/// With [`CapacityGrowth::Allow`] a full role gains one slot at its tail.
///
/// # Errors
///
/// - [`EngineError::SourceMismatch`] if `from` does not hold `person`
/// - [`EngineError::UnknownObject`] for an unknown target object
/// - [`EngineError::CapacityFull`] if the role is full and growth is denied
pub fn move_to_object(
    state: &RosterState,
    person: &PersonId,
    from: &SlotKey,
    object: &ObjectId,
    role: Role,
    growth: CapacityGrowth,
) -> Result<RosterState, EngineError> {
    check_source(state, from, person)?;
    let capacity = capacity_of(state, object, role)?;

    let mut next = state.clone();
    next.assignments.vacate_mut(from);

    let ordinal = match next.assignments.first_empty(object, role, capacity) {
        Some(ordinal) => ordinal,
        None => match growth {
            CapacityGrowth::Allow => {
                set_capacity_mut(&mut next, object, role, capacity + 1)?;
                capacity
            }
            CapacityGrowth::Deny => {
                return Err(EngineError::CapacityFull {
                    object: object.clone(),
                    role,
                    capacity,
                })
            }
        },
    };
    next.assignments
        .place_mut(SlotKey::new(object.clone(), role, ordinal), person.clone());
    Ok(next)
}

/// Moves `person` to the first empty ordinal of `role` in the same object.
///
/// Changing to the current role is a no-op.
///
/// # Errors
///
/// See [`move_to_object`].
pub fn change_role(
    state: &RosterState,
    person: &PersonId,
    from: &SlotKey,
    role: Role,
    growth: CapacityGrowth,
) -> Result<RosterState, EngineError> {
    if role == from.role {
        check_source(state, from, person)?;
        return Ok(state.clone());
    }
    move_to_object(state, person, from, &from.object, role, growth)
}

/// The holder of `from` and `other` trade slots.
///
/// # Errors
///
/// - [`EngineError::SlotEmpty`] if nobody holds `from`
/// - [`EngineError::PersonNotPlaced`] if `other` holds no slot
pub fn swap_with(
    state: &RosterState,
    from: &SlotKey,
    other: &PersonId,
) -> Result<RosterState, EngineError> {
    let person = state
        .assignments
        .get(from)
        .ok_or_else(|| EngineError::SlotEmpty(from.clone()))?;
    let other_slot = state
        .assignments
        .find_slot_of(other)
        .ok_or_else(|| EngineError::PersonNotPlaced(other.clone()))?;
    if other_slot == from {
        return Ok(state.clone());
    }

    let mut next = state.clone();
    next.assignments.put_raw(from.clone(), other.clone());
    next.assignments.put_raw(other_slot.clone(), person.clone());
    Ok(next)
}

/// Inserts an empty slot at `at`, shifting later occupants up.
///
/// `at` may equal the capacity, which appends.
///
/// # Errors
///
/// - [`EngineError::UnknownObject`]
/// - [`EngineError::SlotOutOfRange`] if `at` is beyond the capacity
pub fn add_slot(
    state: &RosterState,
    object: &ObjectId,
    role: Role,
    at: usize,
) -> Result<RosterState, EngineError> {
    let capacity = capacity_of(state, object, role)?;
    if at > capacity {
        return Err(EngineError::SlotOutOfRange {
            slot: SlotKey::new(object.clone(), role, at),
            capacity,
        });
    }
    let mut next = state.clone();
    next.assignments.shift_up_from(object, role, at);
    set_capacity_mut(&mut next, object, role, capacity + 1)?;
    Ok(next)
}

/// Removes the slot at `ordinal`, releasing its holder and shifting later
/// occupants down.
///
/// # Errors
///
/// - [`EngineError::UnknownObject`]
/// - [`EngineError::SlotOutOfRange`] if `ordinal` is not below the capacity
pub fn delete_slot(
    state: &RosterState,
    object: &ObjectId,
    role: Role,
    ordinal: usize,
) -> Result<RosterState, EngineError> {
    let key = SlotKey::new(object.clone(), role, ordinal);
    check_slot(state, &key)?;
    let capacity = capacity_of(state, object, role)?;

    let mut next = state.clone();
    next.assignments.vacate_mut(&key);
    next.assignments.shift_down_after(object, role, ordinal);
    set_capacity_mut(&mut next, object, role, capacity.saturating_sub(1))?;
    next.assignments.compact_mut(object, role);
    Ok(next)
}

/// Sets the capacity of `(object, role)` and compacts the role.
///
/// When shrinking, whoever still sits beyond the new capacity after
/// compaction is released to the pool.
///
/// # Errors
///
/// [`EngineError::UnknownObject`]
pub fn set_capacity(
    state: &RosterState,
    object: &ObjectId,
    role: Role,
    capacity: usize,
) -> Result<RosterState, EngineError> {
    capacity_of(state, object, role)?;
    let mut next = state.clone();
    next.assignments.compact_mut(object, role);
    let evicted = next.assignments.evict_from(object, role, capacity);
    if !evicted.is_empty() {
        debug!(%object, %role, evicted = evicted.len(), "capacity shrink released people");
    }
    set_capacity_mut(&mut next, object, role, capacity)?;
    Ok(next)
}

/// Adds a new audit object.
///
/// # Errors
///
/// [`EngineError::DuplicateObject`] if the id is taken.
pub fn insert_object(state: &RosterState, object: AuditObject) -> Result<RosterState, EngineError> {
    if state.object(&object.id).is_some() {
        return Err(EngineError::DuplicateObject(object.id));
    }
    let mut next = state.clone();
    next.objects.push(object);
    Ok(next)
}

/// Removes an audit object and every assignment it holds.
///
/// # Errors
///
/// [`EngineError::UnknownObject`]
pub fn remove_object(state: &RosterState, object: &ObjectId) -> Result<RosterState, EngineError> {
    if state.object(object).is_none() {
        return Err(EngineError::UnknownObject(object.clone()));
    }
    let mut next = state.clone();
    next.objects.retain(|o| &o.id != object);
    next.assignments.remove_object(object);
    Ok(next)
}

/// Reorders every team by roster position and compacts it.
///
/// People missing from `roster` come first, in their current relative
/// order.
#[must_use]
pub fn sort_teams(state: &RosterState, roster: &[PersonId]) -> RosterState {
    let rank: HashMap<&PersonId, usize> = roster
        .iter()
        .enumerate()
        .map(|(i, person)| (person, i))
        .collect();

    let mut next = state.clone();
    for object in &state.objects {
        for role in Role::ALL {
            let mut list = next.assignments.take_list(&object.id, role);
            if list.is_empty() {
                continue;
            }
            list.sort_by_key(|person| rank.get(person).copied());
            next.assignments.write_list(&object.id, role, list);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> PersonId {
        PersonId::from(id)
    }

    fn o(id: &str) -> ObjectId {
        ObjectId::from(id)
    }

    fn k(object: &str, role: Role, ordinal: usize) -> SlotKey {
        SlotKey::new(object, role, ordinal)
    }

    fn two_objects() -> RosterState {
        RosterState::new(vec![
            AuditObject::new("O1", "Bali")
                .with_capacity(Role::Kt, 1)
                .with_capacity(Role::At, 3),
            AuditObject::new("O2", "Denpasar")
                .with_capacity(Role::Kt, 2)
                .with_capacity(Role::At, 1),
        ])
    }

    fn with(state: RosterState, entries: &[(SlotKey, &str)]) -> RosterState {
        let mut state = state;
        for (key, person) in entries {
            state.assignments.put_raw(key.clone(), p(person));
        }
        state
    }

    fn at_team() -> RosterState {
        with(
            two_objects(),
            &[
                (k("O1", Role::At, 0), "p1"),
                (k("O1", Role::At, 1), "p2"),
                (k("O1", Role::At, 2), "p3"),
            ],
        )
    }

    // --- assign ---

    #[test]
    fn assign_then_occupied_then_self_swap() {
        let s0 = two_objects();
        let s1 = assign_to_empty_slot(&s0, &k("O1", Role::Kt, 0), &p("p1")).expect("assign p1");
        assert_eq!(s1.assignments.find(&o("O1"), Role::Kt, 0), Some(&p("p1")));

        let err = assign_to_empty_slot(&s1, &k("O1", Role::Kt, 0), &p("p2"))
            .expect_err("slot is taken");
        assert!(matches!(err, EngineError::SlotOccupied { .. }));

        let key = k("O1", Role::Kt, 0);
        let s2 = relocate(&s1, &p("p1"), Some(&key), &key, RelocateMode::Swap)
            .expect("self swap");
        assert_eq!(s2, s1);
    }

    #[test]
    fn assign_moves_already_placed_person() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1")]);
        let next = assign_to_empty_slot(&s, &k("O2", Role::Kt, 0), &p("p1")).expect("assign");
        assert_eq!(next.assignments.len(), 1);
        assert_eq!(next.assignments.find_slot_of(&p("p1")), Some(&k("O2", Role::Kt, 0)));
    }

    #[test]
    fn assign_out_of_range_and_unknown_object() {
        let s = two_objects();
        assert!(matches!(
            assign_to_empty_slot(&s, &k("O1", Role::Kt, 1), &p("p1")),
            Err(EngineError::SlotOutOfRange { capacity: 1, .. })
        ));
        assert_eq!(
            assign_to_empty_slot(&s, &k("O9", Role::Kt, 0), &p("p1")),
            Err(EngineError::UnknownObject(o("O9")))
        );
    }

    // --- relocate ---

    #[test]
    fn swap_trades_places() {
        let s = at_team();
        let next = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::At, 0)),
            &k("O1", Role::At, 2),
            RelocateMode::Swap,
        )
        .expect("swap");
        assert_eq!(next.assignments.occupants(&o("O1"), Role::At), vec![p("p3"), p("p2"), p("p1")]);
    }

    #[test]
    fn swap_into_empty_slot_is_a_move() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1")]);
        let next = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::At, 0)),
            &k("O2", Role::Kt, 1),
            RelocateMode::Swap,
        )
        .expect("move");
        assert_eq!(next.assignments.len(), 1);
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 1), Some(&p("p1")));
    }

    #[test]
    fn pool_swap_displaces_occupant_to_pool() {
        let s = with(two_objects(), &[(k("O1", Role::Kt, 0), "p1")]);
        let next = relocate(&s, &p("p9"), None, &k("O1", Role::Kt, 0), RelocateMode::Swap)
            .expect("pool swap");
        assert_eq!(next.assignments.find(&o("O1"), Role::Kt, 0), Some(&p("p9")));
        assert!(!next.assignments.contains_person(&p("p1")));
    }

    #[test]
    fn pool_source_of_placed_person_moves_from_real_slot() {
        let s = with(
            two_objects(),
            &[(k("O1", Role::At, 0), "p1"), (k("O1", Role::At, 1), "p2")],
        );
        let next = relocate(&s, &p("p1"), None, &k("O2", Role::Kt, 0), RelocateMode::InsertShift)
            .expect("shift from pool");
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 0), Some(&p("p1")));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 0), Some(&p("p2")));
        assert!(next.is_contiguous(&o("O1"), Role::At));
        assert!(next.validate().is_ok());
    }

    #[test]
    fn pool_swap_of_placed_person_trades_with_occupant() {
        let s = with(
            two_objects(),
            &[(k("O1", Role::At, 0), "p1"), (k("O2", Role::Kt, 0), "p4")],
        );
        let next = relocate(&s, &p("p1"), None, &k("O2", Role::Kt, 0), RelocateMode::Swap)
            .expect("swap from pool");
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 0), Some(&p("p1")));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 0), Some(&p("p4")));
        assert_eq!(next.assignments.len(), 2);
    }

    #[test]
    fn stale_source_is_rejected() {
        let s = with(two_objects(), &[(k("O1", Role::Kt, 0), "p1")]);
        let err = relocate(
            &s,
            &p("p2"),
            Some(&k("O1", Role::Kt, 0)),
            &k("O2", Role::Kt, 0),
            RelocateMode::Swap,
        )
        .expect_err("p2 is not in O1:KT:0");
        assert!(matches!(err, EngineError::SourceMismatch { .. }));
    }

    #[test]
    fn insert_shift_across_objects() {
        let s = with(
            two_objects(),
            &[(k("O1", Role::Kt, 0), "p1"), (k("O2", Role::Kt, 0), "p4")],
        );
        let next = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::Kt, 0)),
            &k("O2", Role::Kt, 0),
            RelocateMode::InsertShift,
        )
        .expect("insert shift");
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 0), Some(&p("p1")));
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 1), Some(&p("p4")));
        assert_eq!(next.assignments.find(&o("O1"), Role::Kt, 0), None);
        assert_eq!(next.capacity(&o("O2"), Role::Kt), Some(2));
    }

    #[test]
    fn insert_shift_within_list_is_stable() {
        let s = at_team();
        // p1 dropped on the gap before p3: computed after p1 leaves
        let next = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::At, 0)),
            &k("O1", Role::At, 1),
            RelocateMode::InsertShift,
        )
        .expect("reorder");
        assert_eq!(next.assignments.occupants(&o("O1"), Role::At), vec![p("p2"), p("p1"), p("p3")]);
        assert!(next.is_contiguous(&o("O1"), Role::At));
    }

    #[test]
    fn insert_shift_clamps_to_list_end() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1")]);
        let next = relocate(&s, &p("p2"), None, &k("O1", Role::At, 3), RelocateMode::InsertShift)
            .expect("append");
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 1), Some(&p("p2")));
    }

    #[test]
    fn insert_shift_into_full_role_fails() {
        let s = with(
            two_objects(),
            &[(k("O1", Role::Kt, 0), "p1"), (k("O2", Role::At, 0), "p2")],
        );
        let err = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::Kt, 0)),
            &k("O2", Role::At, 0),
            RelocateMode::InsertShift,
        )
        .expect_err("O2:AT holds one");
        assert!(matches!(err, EngineError::CapacityFull { capacity: 1, .. }));
    }

    #[test]
    fn insert_shift_compacts_source_list() {
        let s = at_team();
        let next = relocate(
            &s,
            &p("p1"),
            Some(&k("O1", Role::At, 0)),
            &k("O2", Role::Kt, 0),
            RelocateMode::InsertShift,
        )
        .expect("cross move");
        assert_eq!(next.assignments.occupants(&o("O1"), Role::At), vec![p("p2"), p("p3")]);
        assert!(next.is_contiguous(&o("O1"), Role::At));
    }

    // --- unassign ---

    #[test]
    fn unassign_is_idempotent() {
        let s = at_team();
        let once = unassign(&s, &k("O1", Role::At, 1));
        assert_eq!(unassign(&once, &k("O1", Role::At, 1)), once);
        assert_eq!(once.assignments.len(), 2);
    }

    // --- slots ---

    #[test]
    fn delete_slot_shifts_down() {
        let next = delete_slot(&at_team(), &o("O1"), Role::At, 1).expect("delete");
        assert_eq!(next.capacity(&o("O1"), Role::At), Some(2));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 0), Some(&p("p1")));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 1), Some(&p("p3")));
        assert!(!next.assignments.contains_person(&p("p2")));
    }

    #[test]
    fn add_slot_opens_gap_at_insertion_point() {
        let after_delete = delete_slot(&at_team(), &o("O1"), Role::At, 1).expect("delete");
        let next = add_slot(&after_delete, &o("O1"), Role::At, 1).expect("add");
        assert_eq!(next.capacity(&o("O1"), Role::At), Some(3));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 0), Some(&p("p1")));
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 1), None);
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 2), Some(&p("p3")));
    }

    #[test]
    fn slot_bounds() {
        let s = two_objects();
        assert!(add_slot(&s, &o("O1"), Role::Kt, 1).is_ok());
        assert!(matches!(
            add_slot(&s, &o("O1"), Role::Kt, 2),
            Err(EngineError::SlotOutOfRange { .. })
        ));
        assert!(matches!(
            delete_slot(&s, &o("O1"), Role::Pj, 0),
            Err(EngineError::SlotOutOfRange { capacity: 0, .. })
        ));
    }

    // --- role / object moves ---

    #[test]
    fn change_role_grows_full_role() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1"), (k("O1", Role::Kt, 0), "p2")]);
        let next = change_role(&s, &p("p1"), &k("O1", Role::At, 0), Role::Kt, CapacityGrowth::Allow)
            .expect("change role");
        assert_eq!(next.capacity(&o("O1"), Role::Kt), Some(2));
        assert_eq!(next.assignments.find(&o("O1"), Role::Kt, 1), Some(&p("p1")));
        assert!(next.assignments.occupants(&o("O1"), Role::At).is_empty());
    }

    #[test]
    fn change_role_without_growth_fails_cleanly() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1"), (k("O1", Role::Kt, 0), "p2")]);
        let err = change_role(&s, &p("p1"), &k("O1", Role::At, 0), Role::Kt, CapacityGrowth::Deny)
            .expect_err("KT is full");
        assert_eq!(
            err,
            EngineError::CapacityFull {
                object: o("O1"),
                role: Role::Kt,
                capacity: 1
            }
        );
    }

    #[test]
    fn change_role_to_same_role_is_noop() {
        let s = at_team();
        let next = change_role(&s, &p("p2"), &k("O1", Role::At, 1), Role::At, CapacityGrowth::Allow)
            .expect("same role");
        assert_eq!(next, s);
    }

    #[test]
    fn move_to_object_takes_first_empty_ordinal() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1"), (k("O2", Role::Kt, 1), "p4")]);
        let next = move_to_object(
            &s,
            &p("p1"),
            &k("O1", Role::At, 0),
            &o("O2"),
            Role::Kt,
            CapacityGrowth::Deny,
        )
        .expect("move");
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 0), Some(&p("p1")));
    }

    #[test]
    fn swap_with_other_person() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1"), (k("O2", Role::Kt, 1), "p4")]);
        let next = swap_with(&s, &k("O1", Role::At, 0), &p("p4")).expect("swap");
        assert_eq!(next.assignments.find(&o("O1"), Role::At, 0), Some(&p("p4")));
        assert_eq!(next.assignments.find(&o("O2"), Role::Kt, 1), Some(&p("p1")));

        assert_eq!(
            swap_with(&s, &k("O1", Role::At, 0), &p("p7")),
            Err(EngineError::PersonNotPlaced(p("p7")))
        );
        assert_eq!(
            swap_with(&s, &k("O1", Role::At, 2), &p("p4")),
            Err(EngineError::SlotEmpty(k("O1", Role::At, 2)))
        );
    }

    // --- capacity / objects ---

    #[test]
    fn shrink_compacts_then_evicts() {
        let s = with(two_objects(), &[(k("O1", Role::At, 0), "p1"), (k("O1", Role::At, 2), "p3")]);
        let next = set_capacity(&s, &o("O1"), Role::At, 1).expect("shrink");
        assert_eq!(next.assignments.occupants(&o("O1"), Role::At), vec![p("p1")]);
        assert!(!next.assignments.contains_person(&p("p3")));
        assert_eq!(next.validate(), Ok(()));

        let keep = set_capacity(&s, &o("O1"), Role::At, 2).expect("shrink to fit");
        assert_eq!(keep.assignments.occupants(&o("O1"), Role::At), vec![p("p1"), p("p3")]);
    }

    #[test]
    fn object_insert_and_remove() {
        let s = at_team();
        assert_eq!(
            insert_object(&s, AuditObject::new("O1", "dup")),
            Err(EngineError::DuplicateObject(o("O1")))
        );
        let next = remove_object(&s, &o("O1")).expect("remove");
        assert!(next.object(&o("O1")).is_none());
        assert!(next.assignments.is_empty());
    }

    #[test]
    fn sort_orders_by_roster_and_compacts() {
        let s = with(
            two_objects(),
            &[
                (k("O1", Role::At, 0), "p2"),
                (k("O1", Role::At, 1), "p9"),
                (k("O1", Role::At, 2), "p1"),
            ],
        );
        let next = sort_teams(&s, &[p("p1"), p("p2")]);
        assert_eq!(
            next.assignments.occupants(&o("O1"), Role::At),
            vec![p("p9"), p("p1"), p("p2")]
        );
        assert!(next.is_contiguous(&o("O1"), Role::At));
    }

    #[test]
    fn mutation_serde_is_tagged() {
        let m = Mutation::Relocate {
            person: p("p1"),
            from: None,
            to: k("O1", Role::Kt, 0),
            mode: RelocateMode::InsertShift,
        };
        let json = serde_json::to_value(&m).expect("serialize mutation");
        assert_eq!(json["op"], "relocate");
        assert_eq!(json["to"], "O1:KT:0");
        assert_eq!(json["mode"], "insert_shift");
        assert_eq!(m.kind().label(), "move");
    }

    #[test]
    fn failed_apply_leaves_input_untouched() {
        let s = at_team();
        let before = s.clone();
        let result = apply(
            &s,
            &Mutation::DeleteSlot {
                object: o("O1"),
                role: Role::At,
                ordinal: 7,
            },
        );
        assert!(result.is_err());
        assert_eq!(s, before);
    }
}
