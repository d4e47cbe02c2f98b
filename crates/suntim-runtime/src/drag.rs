//! Drag gestures and slot-insertion offers.
//!
//! # Gesture State Machine
//!
//! ```text
//!          begin(person, source)
//!   Idle ─────────────────────────► Dragging { person, source }
//!    ▲                                   │
//!    │        drop_on(target) / cancel   │
//!    └───────────────────────────────────┘
//! ```
//!
//! A second `begin` while dragging is ignored: the first source stays.
//!
//! # Drop Targets
//!
//! | Target | Source | Mutation |
//! |--------|--------|----------|
//! | slot body, empty | pool | `Assign` |
//! | slot body | slot, or pool onto an occupant | `Relocate` / `Swap` |
//! | gap | any | `Relocate` / `InsertShift` |
//! | pool | slot | `Unassign` |
//! | pool | pool | nothing |

use crate::config::PlacementConfig;
use suntim_engine::{Mutation, RelocateMode, RosterState};
use suntim_types::{ObjectId, PersonId, Role, SlotKey};
use tracing::{debug, warn};

/// Where a dragged person is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The body of a slot, filled or empty.
    Slot(SlotKey),
    /// The gap before `ordinal`; `ordinal == capacity` is the gap after
    /// the last slot.
    Gap(SlotKey),
    /// The unassigned roster.
    Pool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        person: PersonId,
        /// `None` when dragged out of the unassigned roster.
        source: Option<SlotKey>,
    },
}

/// Turns one drag gesture at a time into a mutation.
///
/// # Example
///
/// ```
/// use suntim_engine::{AuditObject, Mutation, RosterState};
/// use suntim_runtime::{DragController, DropTarget};
/// use suntim_types::{PersonId, Role, SlotKey};
///
/// let state = RosterState::new(vec![AuditObject::new("O1", "Bali").with_capacity(Role::At, 2)]);
/// let mut drag = DragController::new();
///
/// drag.begin(PersonId::from("p1"), None);
/// let m = drag.drop_on(DropTarget::Slot(SlotKey::new("O1", Role::At, 0)), &state);
/// assert!(matches!(m, Some(Mutation::Assign { .. })));
/// assert!(!drag.is_dragging());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging `person` from `source`.
    ///
    /// Returns `false` and changes nothing if a drag is already running.
    pub fn begin(&mut self, person: PersonId, source: Option<SlotKey>) -> bool {
        if let DragState::Dragging {
            person: current, ..
        } = &self.state
        {
            warn!(%current, ignored = %person, "drag start while dragging, ignored");
            return false;
        }
        debug!(%person, source = ?source.as_ref().map(ToString::to_string), "drag started");
        self.state = DragState::Dragging { person, source };
        true
    }

    /// Ends the gesture on `target` and returns what to apply, if anything.
    ///
    /// The controller is idle afterwards whatever the outcome. A person
    /// dragged out of the pool who does hold a slot is treated as dragged
    /// from that slot.
    pub fn drop_on(&mut self, target: DropTarget, state: &RosterState) -> Option<Mutation> {
        let DragState::Dragging { person, source } = std::mem::take(&mut self.state) else {
            warn!("drop without an active drag, ignored");
            return None;
        };
        let source = source.or_else(|| state.assignments.find_slot_of(&person).cloned());

        match target {
            DropTarget::Slot(to) => {
                if source.as_ref() == Some(&to) {
                    debug!(%person, slot = %to, "dropped on own slot");
                    return None;
                }
                if source.is_none() && state.assignments.get(&to).is_none() {
                    return Some(Mutation::Assign { slot: to, person });
                }
                Some(Mutation::Relocate {
                    person,
                    from: source,
                    to,
                    mode: RelocateMode::Swap,
                })
            }
            DropTarget::Gap(to) => Some(Mutation::Relocate {
                person,
                from: source,
                to,
                mode: RelocateMode::InsertShift,
            }),
            DropTarget::Pool => source.map(|slot| Mutation::Unassign { slot }),
        }
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }
}

/// A way to add one slot next to a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotInsertion {
    /// Insert into the gap's own role at its ordinal.
    Here {
        object: ObjectId,
        role: Role,
        at: usize,
    },
    /// Append to the tail of the previous role instead.
    PredecessorTail { object: ObjectId, role: Role },
}

impl SlotInsertion {
    /// The `AddSlot` this offer stands for, or `None` for an unknown object.
    #[must_use]
    pub fn to_mutation(&self, state: &RosterState) -> Option<Mutation> {
        match self {
            Self::Here { object, role, at } => Some(Mutation::AddSlot {
                object: object.clone(),
                role: *role,
                at: *at,
            }),
            Self::PredecessorTail { object, role } => {
                let at = state.capacity(object, *role)?;
                Some(Mutation::AddSlot {
                    object: object.clone(),
                    role: *role,
                    at,
                })
            }
        }
    }
}

/// Slot insertions to offer for a gap at `at` in `(object, role)`.
///
/// At ordinal 0 of any role but the first, the tail of the previous role
/// borders the same gap; it is offered too unless the policy says no.
#[must_use]
pub fn slot_insertions(
    object: &ObjectId,
    role: Role,
    at: usize,
    policy: &PlacementConfig,
) -> Vec<SlotInsertion> {
    let mut offers = vec![SlotInsertion::Here {
        object: object.clone(),
        role,
        at,
    }];
    if at == 0 && policy.offer_predecessor_tail {
        if let Some(previous) = role.predecessor() {
            offers.push(SlotInsertion::PredecessorTail {
                object: object.clone(),
                role: previous,
            });
        }
    }
    offers
}
