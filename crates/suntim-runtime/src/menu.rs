//! Command menu of an occupied slot.
//!
//! Clicking a filled slot opens a small menu whose leaves each produce one
//! [`Mutation`]. Menu navigation is UI state only; it never reaches the
//! history.
//!
//! # State Machine
//!
//! ```text
//!                 open(person, from)
//!   Closed ─────────────────────────────► Top
//!                                          │
//!      ┌───────────────┬──────────────────┼──────────────────┐
//!      │ ChooseMove    │ ChooseSwap       │ ChooseRole       │ Release
//!      ▼               ▼                  ▼                  ▼
//!  MoveObjectSelect  SwapObjectSelect   RoleSelect        Emit(Unassign)
//!      │ SelectObject  │ SelectObject     │ SelectRole
//!      ▼               ▼                  ▼
//!  MoveRoleSelect    SwapPersonSelect   Emit(ChangeRole)
//!      │ SelectRole    │ SelectPerson
//!      ▼               ▼
//!  Emit(MoveToObject) Emit(SwapWith)
//! ```
//!
//! `Back` pops one level (closing from `Top`), `Close` closes from
//! anywhere. Any other action that does not fit the current state is
//! ignored.

use crate::config::PlacementConfig;
use suntim_engine::{CapacityGrowth, Mutation, RosterState};
use suntim_types::{ObjectId, PersonId, Role, SlotKey};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Top {
        person: PersonId,
        from: SlotKey,
    },
    MoveObjectSelect {
        person: PersonId,
        from: SlotKey,
    },
    MoveRoleSelect {
        person: PersonId,
        from: SlotKey,
        object: ObjectId,
    },
    SwapObjectSelect {
        person: PersonId,
        from: SlotKey,
    },
    SwapPersonSelect {
        person: PersonId,
        from: SlotKey,
        object: ObjectId,
    },
    RoleSelect {
        person: PersonId,
        from: SlotKey,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ChooseMove,
    ChooseSwap,
    ChooseRole,
    Release,
    SelectObject(ObjectId),
    SelectRole(Role),
    SelectPerson(PersonId),
    Back,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The menu is still open.
    Pending,
    /// A leaf was reached; the menu has closed.
    Emit(Mutation),
    /// The menu closed without producing anything.
    Closed,
}

/// Menu state machine for one slot at a time.
///
/// # Example
///
/// ```
/// use suntim_engine::Mutation;
/// use suntim_runtime::config::PlacementConfig;
/// use suntim_runtime::{CommandMenu, MenuAction, MenuOutcome};
/// use suntim_types::{PersonId, Role, SlotKey};
///
/// let mut menu = CommandMenu::new(&PlacementConfig::default());
/// menu.open(PersonId::from("p1"), SlotKey::new("O1", Role::At, 0));
///
/// assert_eq!(menu.handle(MenuAction::ChooseRole), MenuOutcome::Pending);
/// let out = menu.handle(MenuAction::SelectRole(Role::Kt));
/// assert!(matches!(out, MenuOutcome::Emit(Mutation::ChangeRole { .. })));
/// assert!(!menu.is_open());
/// ```
#[derive(Debug, Clone)]
pub struct CommandMenu {
    state: MenuState,
    move_growth: CapacityGrowth,
    role_growth: CapacityGrowth,
}

impl CommandMenu {
    #[must_use]
    pub fn new(policy: &PlacementConfig) -> Self {
        Self {
            state: MenuState::Closed,
            move_growth: policy.move_growth(),
            role_growth: policy.role_change_growth(),
        }
    }

    /// Opens the top menu for `person` sitting in `from`.
    ///
    /// Reopening replaces whatever was open.
    pub fn open(&mut self, person: PersonId, from: SlotKey) {
        debug!(%person, slot = %from, "menu opened");
        self.state = MenuState::Top { person, from };
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    #[must_use]
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Feeds one action to the menu.
    pub fn handle(&mut self, action: MenuAction) -> MenuOutcome {
        if action == MenuAction::Close {
            return self.close();
        }

        let state = std::mem::take(&mut self.state);
        let (next, emitted) = match (state, action) {
            (MenuState::Closed, _) => return MenuOutcome::Closed,

            (MenuState::Top { .. }, MenuAction::Back) => (MenuState::Closed, None),
            (MenuState::Top { person, from }, MenuAction::ChooseMove) => {
                (MenuState::MoveObjectSelect { person, from }, None)
            }
            (MenuState::Top { person, from }, MenuAction::ChooseSwap) => {
                (MenuState::SwapObjectSelect { person, from }, None)
            }
            (MenuState::Top { person, from }, MenuAction::ChooseRole) => {
                (MenuState::RoleSelect { person, from }, None)
            }
            (MenuState::Top { from, .. }, MenuAction::Release) => {
                (MenuState::Closed, Some(Mutation::Unassign { slot: from }))
            }

            (MenuState::MoveObjectSelect { person, from }, MenuAction::Back) => {
                (MenuState::Top { person, from }, None)
            }
            (MenuState::MoveObjectSelect { person, from }, MenuAction::SelectObject(object)) => {
                (
                    MenuState::MoveRoleSelect {
                        person,
                        from,
                        object,
                    },
                    None,
                )
            }

            (MenuState::MoveRoleSelect { person, from, .. }, MenuAction::Back) => {
                (MenuState::MoveObjectSelect { person, from }, None)
            }
            (
                MenuState::MoveRoleSelect {
                    person,
                    from,
                    object,
                },
                MenuAction::SelectRole(role),
            ) => (
                MenuState::Closed,
                Some(Mutation::MoveToObject {
                    person,
                    from,
                    object,
                    role,
                    growth: self.move_growth,
                }),
            ),

            (MenuState::SwapObjectSelect { person, from }, MenuAction::Back) => {
                (MenuState::Top { person, from }, None)
            }
            (MenuState::SwapObjectSelect { person, from }, MenuAction::SelectObject(object)) => {
                (
                    MenuState::SwapPersonSelect {
                        person,
                        from,
                        object,
                    },
                    None,
                )
            }

            (MenuState::SwapPersonSelect { person, from, .. }, MenuAction::Back) => {
                (MenuState::SwapObjectSelect { person, from }, None)
            }
            (MenuState::SwapPersonSelect { from, .. }, MenuAction::SelectPerson(other)) => (
                MenuState::Closed,
                Some(Mutation::SwapWith { from, other }),
            ),

            (MenuState::RoleSelect { person, from }, MenuAction::Back) => {
                (MenuState::Top { person, from }, None)
            }
            (MenuState::RoleSelect { person, from }, MenuAction::SelectRole(role)) => (
                MenuState::Closed,
                Some(Mutation::ChangeRole {
                    person,
                    from,
                    role,
                    growth: self.role_growth,
                }),
            ),

            (state, action) => {
                debug!(?action, "menu action ignored in current state");
                (state, None)
            }
        };

        self.state = next;
        match emitted {
            Some(mutation) => MenuOutcome::Emit(mutation),
            None if self.is_open() => MenuOutcome::Pending,
            None => MenuOutcome::Closed,
        }
    }

    fn close(&mut self) -> MenuOutcome {
        self.state = MenuState::Closed;
        MenuOutcome::Closed
    }

    /// People the swap submenu lists for the chosen object.
    #[must_use]
    pub fn swap_candidates<'a>(&self, state: &'a RosterState) -> Vec<&'a PersonId> {
        match &self.state {
            MenuState::SwapPersonSelect { person, object, .. } => state
                .team(object)
                .into_iter()
                .map(|(_, p)| p)
                .filter(|p| *p != person)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Roles the role submenu offers: every role but the current one.
    #[must_use]
    pub fn role_choices(&self) -> Vec<Role> {
        match &self.state {
            MenuState::RoleSelect { from, .. } => {
                Role::ALL.into_iter().filter(|r| *r != from.role).collect()
            }
            MenuState::MoveRoleSelect { .. } => Role::ALL.to_vec(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suntim_engine::AuditObject;

    fn from() -> SlotKey {
        SlotKey::new("O1", Role::At, 0)
    }

    fn opened() -> CommandMenu {
        let mut menu = CommandMenu::new(&PlacementConfig::default());
        menu.open(PersonId::from("p1"), from());
        menu
    }

    #[test]
    fn move_path_emits_move_to_object_without_growth() {
        let mut menu = opened();
        assert_eq!(menu.handle(MenuAction::ChooseMove), MenuOutcome::Pending);
        assert_eq!(
            menu.handle(MenuAction::SelectObject("O2".into())),
            MenuOutcome::Pending
        );
        assert_eq!(
            menu.handle(MenuAction::SelectRole(Role::Kt)),
            MenuOutcome::Emit(Mutation::MoveToObject {
                person: PersonId::from("p1"),
                from: from(),
                object: "O2".into(),
                role: Role::Kt,
                growth: CapacityGrowth::Deny,
            })
        );
        assert_eq!(menu.state(), &MenuState::Closed);
    }

    #[test]
    fn swap_path_emits_swap_with() {
        let mut menu = opened();
        menu.handle(MenuAction::ChooseSwap);
        menu.handle(MenuAction::SelectObject("O2".into()));
        assert_eq!(
            menu.handle(MenuAction::SelectPerson(PersonId::from("p4"))),
            MenuOutcome::Emit(Mutation::SwapWith {
                from: from(),
                other: PersonId::from("p4"),
            })
        );
    }

    #[test]
    fn release_from_top() {
        let mut menu = opened();
        assert_eq!(
            menu.handle(MenuAction::Release),
            MenuOutcome::Emit(Mutation::Unassign { slot: from() })
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn back_pops_one_level() {
        let mut menu = opened();
        menu.handle(MenuAction::ChooseMove);
        menu.handle(MenuAction::SelectObject("O2".into()));
        assert_eq!(menu.handle(MenuAction::Back), MenuOutcome::Pending);
        assert!(matches!(menu.state(), MenuState::MoveObjectSelect { .. }));
        menu.handle(MenuAction::Back);
        assert!(matches!(menu.state(), MenuState::Top { .. }));
        assert_eq!(menu.handle(MenuAction::Back), MenuOutcome::Closed);
    }

    #[test]
    fn invalid_actions_are_ignored() {
        let mut menu = opened();
        assert_eq!(
            menu.handle(MenuAction::SelectRole(Role::Kt)),
            MenuOutcome::Pending
        );
        assert!(matches!(menu.state(), MenuState::Top { .. }));

        menu.handle(MenuAction::ChooseRole);
        assert_eq!(menu.handle(MenuAction::ChooseSwap), MenuOutcome::Pending);
        assert!(matches!(menu.state(), MenuState::RoleSelect { .. }));

        let mut closed = CommandMenu::new(&PlacementConfig::default());
        assert_eq!(closed.handle(MenuAction::Release), MenuOutcome::Closed);
    }

    #[test]
    fn close_from_anywhere() {
        let mut menu = opened();
        menu.handle(MenuAction::ChooseSwap);
        menu.handle(MenuAction::SelectObject("O1".into()));
        assert_eq!(menu.handle(MenuAction::Close), MenuOutcome::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn role_change_growth_follows_policy() {
        let policy = PlacementConfig {
            grow_on_role_change: false,
            ..PlacementConfig::default()
        };
        let mut menu = CommandMenu::new(&policy);
        menu.open(PersonId::from("p1"), from());
        menu.handle(MenuAction::ChooseRole);
        assert_eq!(menu.role_choices().len(), 6);
        let out = menu.handle(MenuAction::SelectRole(Role::Pj));
        assert!(matches!(
            out,
            MenuOutcome::Emit(Mutation::ChangeRole {
                growth: CapacityGrowth::Deny,
                ..
            })
        ));
    }

    #[test]
    fn swap_candidates_exclude_self() {
        let mut state = RosterState::new(vec![AuditObject::new("O1", "Bali").with_capacity(Role::At, 3)]);
        state.assignments = state
            .assignments
            .place(SlotKey::new("O1", Role::At, 0), PersonId::from("p1"))
            .place(SlotKey::new("O1", Role::At, 1), PersonId::from("p2"));

        let mut menu = opened();
        menu.handle(MenuAction::ChooseSwap);
        menu.handle(MenuAction::SelectObject("O1".into()));
        assert_eq!(menu.swap_candidates(&state), vec![&PersonId::from("p2")]);
    }
}
