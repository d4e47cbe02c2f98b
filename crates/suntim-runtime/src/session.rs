//! The interactive roster session.
//!
//! A [`RosterSession`] owns everything one editing session needs: the
//! live [`RosterState`], the personnel roster, the undo history and the
//! placement policy. Gestures and menu actions are turned into
//! [`Mutation`]s elsewhere and handed to [`RosterSession::apply`].
//!
//! # Flow
//!
//! ```text
//! gesture ──► DragController / CommandMenu ──► Mutation
//!                                                │
//!                                                ▼
//!                          RosterSession::apply (engine call)
//!                                                │
//!                                 changed? ──► History::record
//! ```

use crate::config::{PlacementConfig, SuntimConfig};
use crate::history::History;
use serde::Serialize;
use suntim_engine::{
    apply, EngineError, InvariantViolation, Mutation, MutationKind, Person, RosterState,
};
use suntim_types::{ErrorCode, PersonId};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Session error.
///
/// # Error Code Convention
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`Engine`](SessionError::Engine) | inner `ENGINE_*` code | inner |
/// | [`InvalidState`](SessionError::InvalidState) | `SESSION_INVALID_STATE` | No |
/// | [`DuplicatePerson`](SessionError::DuplicatePerson) | `SESSION_DUPLICATE_PERSON` | No |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The engine rejected a mutation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A loaded state breaks the table invariants.
    #[error("state violates {} invariant(s): {}", .0.len(), first_violation(.0))]
    InvalidState(Vec<InvariantViolation>),

    /// The roster already lists this person.
    #[error("person {0} is already on the roster")]
    DuplicatePerson(PersonId),
}

fn first_violation(violations: &[InvariantViolation]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl ErrorCode for SessionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Engine(e) => e.code(),
            Self::InvalidState(_) => "SESSION_INVALID_STATE",
            Self::DuplicatePerson(_) => "SESSION_DUPLICATE_PERSON",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Engine(e) => e.is_recoverable(),
            Self::InvalidState(_) | Self::DuplicatePerson(_) => false,
        }
    }
}

/// Undo/redo availability, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_label: Option<MutationKind>,
    pub redo_label: Option<MutationKind>,
}

/// One editing session over a roster.
///
/// # Example
///
/// ```
/// use suntim_engine::{AuditObject, Mutation, Person, RosterState};
/// use suntim_runtime::config::SuntimConfig;
/// use suntim_runtime::RosterSession;
/// use suntim_types::{PersonId, Role, SlotKey};
///
/// let state = RosterState::new(vec![AuditObject::new("O1", "Bali").with_capacity(Role::Kt, 1)]);
/// let people = vec![Person::new("p1", "Budi")];
/// let mut session = RosterSession::new(state, people, &SuntimConfig::default())?;
///
/// session.apply(Mutation::Assign {
///     slot: SlotKey::new("O1", Role::Kt, 0),
///     person: PersonId::from("p1"),
/// })?;
/// assert!(session.status().can_undo);
///
/// session.undo();
/// assert!(session.state().assignments.is_empty());
/// # Ok::<(), suntim_runtime::SessionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RosterSession {
    id: Uuid,
    state: RosterState,
    people: Vec<Person>,
    history: History,
    policy: PlacementConfig,
}

impl RosterSession {
    /// Starts a session over `state`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] if `state` breaks the invariants.
    pub fn new(
        state: RosterState,
        people: Vec<Person>,
        config: &SuntimConfig,
    ) -> Result<Self, SessionError> {
        state.validate().map_err(SessionError::InvalidState)?;
        let id = Uuid::new_v4();
        info!(session = %id, objects = state.objects.len(), people = people.len(), "session started");
        Ok(Self {
            id,
            history: History::new(state.clone(), config.history.effective_capacity()),
            state,
            people,
            policy: config.placement.clone(),
        })
    }

    /// A session with no objects and nobody on the roster.
    #[must_use]
    pub fn empty(config: &SuntimConfig) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "session started empty");
        Self {
            id,
            state: RosterState::default(),
            people: Vec::new(),
            history: History::new(RosterState::default(), config.history.effective_capacity()),
            policy: config.placement.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &RosterState {
        &self.state
    }

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn policy(&self) -> &PlacementConfig {
        &self.policy
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs `mutation` and records a snapshot if the state changed.
    ///
    /// Returns whether the state changed.
    ///
    /// # Errors
    ///
    /// [`SessionError::Engine`] with the engine's rejection; the session
    /// is left as it was.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, SessionError> {
        let kind = mutation.kind();
        let next = apply(&self.state, &mutation).map_err(|e| {
            warn!(%kind, code = e.code(), error = %e, "mutation rejected");
            SessionError::Engine(e)
        })?;

        if next == self.state {
            debug!(%kind, "mutation left state unchanged, not recorded");
            return Ok(false);
        }

        self.history
            .record(suntim_engine::Snapshot::after(kind, next.clone()));
        self.state = next;
        Ok(true)
    }

    /// Restores the previous snapshot. Returns what was undone.
    pub fn undo(&mut self) -> Option<MutationKind> {
        let label = self.history.undo_label();
        let snapshot = self.history.undo()?;
        self.state = snapshot.state().clone();
        label
    }

    /// Re-applies the next snapshot. Returns what was redone.
    pub fn redo(&mut self) -> Option<MutationKind> {
        let snapshot = self.history.redo()?;
        self.state = snapshot.state().clone();
        snapshot.cause()
    }

    /// Replaces the whole roster and starts a fresh history.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] if `state` breaks the invariants;
    /// the session is left as it was.
    pub fn load(&mut self, state: RosterState, people: Vec<Person>) -> Result<(), SessionError> {
        state.validate().map_err(SessionError::InvalidState)?;
        info!(
            session = %self.id,
            objects = state.objects.len(),
            filled = state.assignments.len(),
            "roster loaded, history reset"
        );
        self.history.reset(state.clone());
        self.state = state;
        self.people = people;
        Ok(())
    }

    /// Appends a person to the roster. Roster edits are not undoable.
    ///
    /// # Errors
    ///
    /// [`SessionError::DuplicatePerson`] if the id is already listed.
    pub fn add_person(&mut self, person: Person) -> Result<(), SessionError> {
        if self.people.iter().any(|p| p.id == person.id) {
            return Err(SessionError::DuplicatePerson(person.id));
        }
        self.people.push(person);
        Ok(())
    }

    #[must_use]
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    /// Roster ids in roster order, for sorting teams.
    #[must_use]
    pub fn roster_order(&self) -> Vec<PersonId> {
        self.people.iter().map(|p| p.id.clone()).collect()
    }

    /// Active people holding no slot.
    #[must_use]
    pub fn unassigned(&self) -> Vec<&Person> {
        self.state.unassigned(&self.people)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            undo_label: self.history.undo_label(),
            redo_label: self.history.redo_label(),
        }
    }
}
