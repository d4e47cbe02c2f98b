//! End-to-end flows through the runtime: gestures and menu actions feed a
//! session, the session is saved and reloaded.

use suntim_engine::{AuditObject, Mutation, Person, RosterState};
use suntim_runtime::config::SuntimConfig;
use suntim_runtime::project::{ProjectDocument, ProjectStatus, ProjectStore};
use suntim_runtime::{
    slot_insertions, CommandMenu, DragController, DropTarget, MenuAction, MenuOutcome,
    RosterSession,
};
use suntim_types::{ErrorCode, PersonId, Role, SlotKey};
use tempfile::TempDir;

fn session() -> RosterSession {
    let state = RosterState::new(vec![
        AuditObject::new("O1", "Kab. Badung")
            .with_capacity(Role::Kt, 1)
            .with_capacity(Role::Kst, 1)
            .with_capacity(Role::At, 3),
        AuditObject::new("O2", "Kota Denpasar")
            .with_capacity(Role::Kt, 1)
            .with_capacity(Role::At, 2),
    ]);
    let people = ["Budi", "Siti", "Eka", "Suteja", "Eko"]
        .iter()
        .enumerate()
        .map(|(i, name)| Person::new(format!("p{}", i + 1), *name))
        .collect();
    RosterSession::new(state, people, &SuntimConfig::default()).expect("valid session")
}

fn slot(object: &str, role: Role, ordinal: usize) -> SlotKey {
    SlotKey::new(object, role, ordinal)
}

fn pid(id: &str) -> PersonId {
    PersonId::from(id)
}

fn drag(session: &mut RosterSession, person: &str, target: DropTarget) -> bool {
    let mut drag = DragController::new();
    let source = session.state().assignments.find_slot_of(&pid(person)).cloned();
    drag.begin(pid(person), source);
    match drag.drop_on(target, session.state()) {
        Some(m) => session.apply(m).expect("gesture applies"),
        None => false,
    }
}

fn at_members(session: &RosterSession, object: &str) -> Vec<String> {
    session
        .state()
        .team(&object.into())
        .into_iter()
        .filter(|(role, _)| *role == Role::At)
        .map(|(_, p)| p.to_string())
        .collect()
}

#[test]
fn drag_fill_then_insert_at_front() {
    let mut s = session();
    assert!(drag(&mut s, "p1", DropTarget::Slot(slot("O1", Role::At, 0))));
    assert!(drag(&mut s, "p2", DropTarget::Slot(slot("O1", Role::At, 1))));
    assert!(drag(&mut s, "p3", DropTarget::Gap(slot("O1", Role::At, 0))));

    assert_eq!(at_members(&s, "O1"), ["p3", "p1", "p2"]);
    assert!(s.state().is_contiguous(&"O1".into(), Role::At));

    s.undo();
    assert_eq!(at_members(&s, "O1"), ["p1", "p2"]);
}

#[test]
fn insert_into_full_list_is_rejected() {
    let mut s = session();
    for (i, p) in ["p1", "p2", "p3"].iter().enumerate() {
        drag(&mut s, p, DropTarget::Slot(slot("O1", Role::At, i)));
    }
    let before = s.state().clone();

    let mut gesture = DragController::new();
    gesture.begin(pid("p4"), None);
    let m = gesture
        .drop_on(DropTarget::Gap(slot("O1", Role::At, 1)), s.state())
        .expect("gap drop yields a mutation");
    let err = s.apply(m).expect_err("list is full");
    assert_eq!(err.code(), "ENGINE_CAPACITY_FULL");
    assert_eq!(s.state(), &before);
}

#[test]
fn swap_across_objects_by_drag() {
    let mut s = session();
    drag(&mut s, "p1", DropTarget::Slot(slot("O1", Role::Kt, 0)));
    drag(&mut s, "p2", DropTarget::Slot(slot("O2", Role::Kt, 0)));

    assert!(drag(&mut s, "p1", DropTarget::Slot(slot("O2", Role::Kt, 0))));
    assert_eq!(
        s.state().assignments.get(&slot("O1", Role::Kt, 0)),
        Some(&pid("p2"))
    );
    assert_eq!(
        s.state().assignments.get(&slot("O2", Role::Kt, 0)),
        Some(&pid("p1"))
    );
}

#[test]
fn menu_role_change_grows_target_role() {
    let mut s = session();
    drag(&mut s, "p1", DropTarget::Slot(slot("O1", Role::Kt, 0)));
    drag(&mut s, "p2", DropTarget::Slot(slot("O1", Role::At, 0)));

    let mut menu = CommandMenu::new(s.policy());
    menu.open(pid("p2"), slot("O1", Role::At, 0));
    menu.handle(MenuAction::ChooseRole);
    let MenuOutcome::Emit(m) = menu.handle(MenuAction::SelectRole(Role::Kt)) else {
        panic!("role selection should emit");
    };
    assert!(s.apply(m).expect("role change"));

    assert_eq!(s.state().capacity(&"O1".into(), Role::Kt), Some(2));
    assert_eq!(
        s.state().assignments.get(&slot("O1", Role::Kt, 1)),
        Some(&pid("p2"))
    );
    assert_eq!(s.status().undo_label.map(|k| k.label()), Some("change role"));
}

#[test]
fn menu_move_into_full_object_is_rejected() {
    let mut s = session();
    drag(&mut s, "p1", DropTarget::Slot(slot("O1", Role::At, 0)));
    drag(&mut s, "p2", DropTarget::Slot(slot("O2", Role::Kt, 0)));

    let mut menu = CommandMenu::new(s.policy());
    menu.open(pid("p1"), slot("O1", Role::At, 0));
    menu.handle(MenuAction::ChooseMove);
    menu.handle(MenuAction::SelectObject("O2".into()));
    let MenuOutcome::Emit(m) = menu.handle(MenuAction::SelectRole(Role::Kt)) else {
        panic!("move should emit");
    };
    let err = s.apply(m).expect_err("KT of O2 is full");
    assert_eq!(err.code(), "ENGINE_CAPACITY_FULL");
    assert!(err.is_recoverable());
}

#[test]
fn predecessor_tail_offer_extends_previous_role() {
    let mut s = session();
    let offers = slot_insertions(&"O1".into(), Role::At, 0, s.policy());
    let tail = offers
        .last()
        .and_then(|o| o.to_mutation(s.state()))
        .expect("tail offer");
    assert_eq!(
        tail,
        Mutation::AddSlot {
            object: "O1".into(),
            role: Role::Kst,
            at: 1,
        }
    );
    s.apply(tail).expect("add slot");
    assert_eq!(s.state().capacity(&"O1".into(), Role::Kst), Some(2));
}

#[test]
fn save_and_reload_starts_fresh_history() {
    let temp = TempDir::new().expect("create temp dir");
    let store = ProjectStore::new(temp.path()).expect("open store");

    let mut s = session();
    drag(&mut s, "p1", DropTarget::Slot(slot("O1", Role::Kt, 0)));
    drag(&mut s, "p5", DropTarget::Slot(slot("O2", Role::At, 0)));

    let doc = ProjectDocument::capture(
        "LKPD Bali",
        ProjectStatus::ReviewMadya,
        s.state(),
        s.people(),
    );
    let path = store.save(&doc).expect("save");
    assert!(path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("SUNTIM_RevMadya_")));

    let loaded = ProjectStore::load(&path).expect("load");
    assert_eq!(loaded.title, "LKPD Bali");
    let (state, people) = loaded.into_parts();

    let mut reopened = RosterSession::empty(&SuntimConfig::default());
    reopened.load(state, people).expect("valid document");
    assert_eq!(reopened.state(), s.state());
    assert!(!reopened.status().can_undo);
    assert_eq!(reopened.unassigned().len(), 3);
}
