//! Replays script commands against a roster session.
//!
//! Gesture commands go through a [`DragController`], slot-menu commands
//! through a [`CommandMenu`], so a script exercises the same paths an
//! interactive front end would.

use crate::render;
use crate::script::ScriptCommand;
use std::path::PathBuf;
use suntim_engine::{AuditObject, EngineError, Mutation, Person};
use suntim_runtime::config::SuntimConfig;
use suntim_runtime::project::{ProjectDocument, ProjectError, ProjectStatus, ProjectStore};
use suntim_runtime::{
    slot_insertions, CommandMenu, DragController, DropTarget, MenuAction, MenuOutcome,
    RosterSession, SessionError, SlotInsertion,
};
use suntim_types::{ErrorCode, PersonId, SlotKey};
use thiserror::Error;
use tracing::debug;

/// Title used until a script or document sets one.
pub const DEFAULT_TITLE: &str = "Proyek Pemeriksaan Baru";

/// Why a script command failed.
///
/// # Error Code Convention
///
/// | Error | Code |
/// |-------|------|
/// | [`Session`](CommandError::Session) | inner `ENGINE_*` / `SESSION_*` code |
/// | [`Project`](CommandError::Project) | inner `PROJECT_*` code |
/// | [`Parse`](CommandError::Parse) | `CLI_PARSE` |
/// | [`Gesture`](CommandError::Gesture) | `CLI_GESTURE` |
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("{reason}: {input}")]
    Parse { input: String, reason: String },

    /// A gesture or menu path that leads nowhere.
    #[error("{0}")]
    Gesture(String),
}

impl From<EngineError> for CommandError {
    fn from(e: EngineError) -> Self {
        Self::Session(SessionError::Engine(e))
    }
}

impl ErrorCode for CommandError {
    fn code(&self) -> &'static str {
        match self {
            Self::Session(e) => e.code(),
            Self::Project(e) => e.code(),
            Self::Parse { .. } => "CLI_PARSE",
            Self::Gesture(_) => "CLI_GESTURE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Session(e) => e.is_recoverable(),
            Self::Project(e) => e.is_recoverable(),
            Self::Parse { .. } | Self::Gesture(_) => true,
        }
    }
}

/// Script replay state: the session plus the UI controllers around it.
pub struct Driver {
    session: RosterSession,
    drag: DragController,
    menu: CommandMenu,
    title: String,
    stage: ProjectStatus,
    project_dir: PathBuf,
}

impl Driver {
    #[must_use]
    pub fn new(session: RosterSession, config: &SuntimConfig) -> Self {
        Self {
            menu: CommandMenu::new(session.policy()),
            session,
            drag: DragController::new(),
            title: DEFAULT_TITLE.to_string(),
            stage: ProjectStatus::default(),
            project_dir: config.paths.project_dir_or_default(),
        }
    }

    /// Opens a saved document.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] if the document breaks the invariants.
    pub fn from_document(doc: ProjectDocument, config: &SuntimConfig) -> Result<Self, SessionError> {
        let title = doc.title.clone();
        let stage = doc.status;
        let (state, people) = doc.into_parts();
        let mut driver = Self::new(RosterSession::new(state, people, config)?, config);
        if !title.is_empty() {
            driver.title = title;
        }
        driver.stage = stage;
        Ok(driver)
    }

    #[must_use]
    pub fn session(&self) -> &RosterSession {
        &self.session
    }

    /// The session as a document stamped now.
    #[must_use]
    pub fn document(&self) -> ProjectDocument {
        ProjectDocument::capture(
            self.title.clone(),
            self.stage,
            self.session.state(),
            self.session.people(),
        )
    }

    /// Runs one command. `Ok(Some(text))` is output to print.
    ///
    /// # Errors
    ///
    /// Any rejection; the session is unchanged when this returns `Err`.
    pub fn execute(&mut self, cmd: ScriptCommand) -> Result<Option<String>, CommandError> {
        match cmd {
            ScriptCommand::Empty => Ok(None),
            ScriptCommand::Invalid { input, reason } => Err(CommandError::Parse { input, reason }),

            ScriptCommand::Object { id, name, slots } => {
                let object = slots
                    .into_iter()
                    .fold(AuditObject::new(id, name), |o, (role, n)| {
                        o.with_capacity(role, n)
                    });
                self.apply(Mutation::InsertObject { object })
            }
            ScriptCommand::Person { id, name, active } => {
                let mut person = Person::new(id, name);
                person.active = active;
                self.session.add_person(person)?;
                Ok(None)
            }
            ScriptCommand::Assign { slot, person } => self.apply(Mutation::Assign { slot, person }),

            ScriptCommand::Drag { person, source } => {
                self.drag.begin(person, source);
                Ok(None)
            }
            ScriptCommand::DropSlot(slot) => self.drop_on(DropTarget::Slot(slot)),
            ScriptCommand::DropGap(slot) => self.drop_on(DropTarget::Gap(slot)),
            ScriptCommand::DropPool => self.drop_on(DropTarget::Pool),
            ScriptCommand::Cancel => {
                self.drag.cancel();
                Ok(None)
            }

            ScriptCommand::Move { from, to, mode } => {
                let person = self.occupant(&from)?;
                self.apply(Mutation::Relocate {
                    person,
                    from: Some(from),
                    to,
                    mode,
                })
            }
            ScriptCommand::MoveTo { from, object, role } => self.through_menu(
                from,
                &[
                    MenuAction::ChooseMove,
                    MenuAction::SelectObject(object),
                    MenuAction::SelectRole(role),
                ],
            ),
            ScriptCommand::Release(from) => self.through_menu(from, &[MenuAction::Release]),
            ScriptCommand::Role { from, role } => self.through_menu(
                from,
                &[MenuAction::ChooseRole, MenuAction::SelectRole(role)],
            ),
            ScriptCommand::Swap { from, other } => {
                let object = self
                    .session
                    .state()
                    .assignments
                    .find_slot_of(&other)
                    .map_or_else(|| from.object.clone(), |s| s.object.clone());
                self.through_menu(
                    from,
                    &[
                        MenuAction::ChooseSwap,
                        MenuAction::SelectObject(object),
                        MenuAction::SelectPerson(other),
                    ],
                )
            }

            ScriptCommand::AddSlot { at, tail } => {
                let offers = slot_insertions(&at.object, at.role, at.ordinal, self.session.policy());
                let offer = offers
                    .into_iter()
                    .find(|o| matches!(o, SlotInsertion::PredecessorTail { .. }) == tail)
                    .ok_or_else(|| CommandError::Gesture(format!("no predecessor tail next to {at}")))?;
                let mutation = offer
                    .to_mutation(self.session.state())
                    .ok_or_else(|| EngineError::UnknownObject(at.object.clone()))?;
                self.apply(mutation)
            }
            ScriptCommand::DeleteSlot(slot) => self.apply(Mutation::DeleteSlot {
                object: slot.object,
                role: slot.role,
                ordinal: slot.ordinal,
            }),
            ScriptCommand::Capacity {
                object,
                role,
                capacity,
            } => self.apply(Mutation::SetCapacity {
                object,
                role,
                capacity,
            }),
            ScriptCommand::RemoveObject(object) => self.apply(Mutation::RemoveObject { object }),
            ScriptCommand::Sort => {
                let roster = self.session.roster_order();
                self.apply(Mutation::SortTeams { roster })
            }

            ScriptCommand::Title(title) => {
                self.title = title;
                Ok(None)
            }
            ScriptCommand::Stage(stage) => {
                self.stage = stage;
                Ok(None)
            }
            ScriptCommand::Save => {
                let path = ProjectStore::new(&self.project_dir)?.save(&self.document())?;
                Ok(Some(format!("saved {}", path.display())))
            }

            ScriptCommand::Undo => Ok(Some(match self.session.undo() {
                Some(kind) => format!("undo: {kind}"),
                None => "nothing to undo".to_string(),
            })),
            ScriptCommand::Redo => Ok(Some(match self.session.redo() {
                Some(kind) => format!("redo: {kind}"),
                None => "nothing to redo".to_string(),
            })),
            ScriptCommand::Show => Ok(Some(render::roster(&self.session))),
            ScriptCommand::Pool => Ok(Some(render::pool(&self.session))),
            ScriptCommand::Status => Ok(Some(render::status(
                &self.session,
                &self.title,
                self.stage,
            ))),
            ScriptCommand::Offers(at) => {
                let offers = slot_insertions(&at.object, at.role, at.ordinal, self.session.policy());
                Ok(Some(render::offers(&offers, self.session.state())))
            }
        }
    }

    fn apply(&mut self, mutation: Mutation) -> Result<Option<String>, CommandError> {
        self.session.apply(mutation)?;
        Ok(None)
    }

    fn occupant(&self, slot: &SlotKey) -> Result<PersonId, CommandError> {
        self.session
            .state()
            .assignments
            .get(slot)
            .cloned()
            .ok_or_else(|| EngineError::SlotEmpty(slot.clone()).into())
    }

    fn drop_on(&mut self, target: DropTarget) -> Result<Option<String>, CommandError> {
        match self.drag.drop_on(target, self.session.state()) {
            Some(mutation) => self.apply(mutation),
            None => Ok(None),
        }
    }

    /// Opens the slot menu on `from` and feeds it `actions`.
    fn through_menu(
        &mut self,
        from: SlotKey,
        actions: &[MenuAction],
    ) -> Result<Option<String>, CommandError> {
        let person = self.occupant(&from)?;
        self.menu.open(person, from);
        for action in actions {
            match self.menu.handle(action.clone()) {
                MenuOutcome::Pending => {}
                MenuOutcome::Emit(mutation) => return self.apply(mutation),
                MenuOutcome::Closed => break,
            }
        }
        debug!(state = ?self.menu.state(), "menu path ended without a mutation");
        self.menu.handle(MenuAction::Close);
        Err(CommandError::Gesture("menu closed without an action".into()))
    }
}
