//! Plain-text rendering for `show`, `pool`, `status` and `offers`.

use std::fmt::Write;
use suntim_engine::RosterState;
use suntim_runtime::project::ProjectStatus;
use suntim_runtime::{RosterSession, SlotInsertion};

/// Every object's slots in role and ordinal order; `-` marks an empty slot.
///
/// ```text
/// O1 Kab. Badung
///   KT   0  p1 Budi
///   AT   0  -
/// ```
pub fn roster(session: &RosterSession) -> String {
    let state = session.state();
    if state.objects.is_empty() {
        return "(no objects)".to_string();
    }

    let mut out = String::new();
    for object in &state.objects {
        let _ = writeln!(out, "{} {}", object.id, object.name);
        let slots = state.slots(&object.id);
        if slots.is_empty() {
            let _ = writeln!(out, "  (no slots)");
        }
        for (key, occupant) in slots {
            let who = match occupant {
                Some(id) => match session.person(id) {
                    Some(p) => format!("{id} {}", p.display_name()),
                    None => id.to_string(),
                },
                None => "-".to_string(),
            };
            let _ = writeln!(out, "  {:<4}{:>2}  {who}", key.role.short(), key.ordinal);
        }
    }
    out.trim_end().to_string()
}

/// Active people holding no slot, in roster order.
pub fn pool(session: &RosterSession) -> String {
    let people = session.unassigned();
    let mut out = format!("pool ({})", people.len());
    for p in people {
        let _ = write!(out, "\n  {} {}", p.id, p.display_name());
    }
    out
}

pub fn status(session: &RosterSession, title: &str, stage: ProjectStatus) -> String {
    let st = session.status();
    let label = |kind: Option<suntim_engine::MutationKind>| {
        kind.map(|k| format!(" ({k})")).unwrap_or_default()
    };
    format!(
        "project: {title} [{}]\ncan_undo: {}{}\ncan_redo: {}{}",
        stage.short_code(),
        st.can_undo,
        label(st.undo_label),
        st.can_redo,
        label(st.redo_label),
    )
}

/// Numbered slot-insertion offers for a gap.
pub fn offers(offers: &[SlotInsertion], state: &RosterState) -> String {
    offers
        .iter()
        .enumerate()
        .map(|(i, offer)| {
            let text = match offer {
                SlotInsertion::Here { object, role, at } => {
                    format!("add {} slot at {object}:{}:{at}", role.short(), role.key())
                }
                SlotInsertion::PredecessorTail { object, role } => {
                    let at = state.capacity(object, *role).unwrap_or_default();
                    format!(
                        "append {} slot at {object}:{}:{at}",
                        role.short(),
                        role.key()
                    )
                }
            };
            format!("{}. {text}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use suntim_engine::{AuditObject, Mutation, Person};
    use suntim_runtime::config::SuntimConfig;
    use suntim_types::{PersonId, Role, SlotKey};

    fn session() -> RosterSession {
        let state = RosterState::new(vec![AuditObject::new("O1", "Kab. Badung")
            .with_capacity(Role::Kt, 1)
            .with_capacity(Role::Dukrik, 1)]);
        let people = vec![Person::new("p1", "Budi"), Person::new("p2", "")];
        let mut s = RosterSession::new(state, people, &SuntimConfig::default()).expect("session");
        s.apply(Mutation::Assign {
            slot: SlotKey::new("O1", Role::Kt, 0),
            person: PersonId::from("p1"),
        })
        .expect("assign");
        s
    }

    #[test]
    fn roster_marks_empty_slots() {
        let text = roster(&session());
        assert_eq!(
            text,
            "O1 Kab. Badung\n  KT   0  p1 Budi\n  DKR  0  -"
        );
    }

    #[test]
    fn empty_roster() {
        let s = RosterSession::empty(&SuntimConfig::default());
        assert_eq!(roster(&s), "(no objects)");
    }

    #[test]
    fn pool_falls_back_to_id() {
        assert_eq!(pool(&session()), "pool (1)\n  p2 p2");
    }

    #[test]
    fn status_shows_labels() {
        let text = status(&session(), "LKPD", ProjectStatus::Draft);
        assert!(text.contains("project: LKPD [DraftDAC]"));
        assert!(text.contains("can_undo: true (assign)"));
        assert!(text.contains("can_redo: false"));
    }

    #[test]
    fn offers_are_numbered() {
        let s = session();
        let list = suntim_runtime::slot_insertions(
            &"O1".into(),
            Role::Dukrik,
            0,
            s.policy(),
        );
        assert_eq!(
            offers(&list, s.state()),
            "1. add DKR slot at O1:Dukrik:0\n2. append AT slot at O1:AT:0"
        );
    }
}
