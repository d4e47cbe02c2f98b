//! Stateless script line parser.
//!
//! # Example
//!
//! ```ignore
//! let cmd = ScriptParser::parse("assign O1 KT 0 p1");
//! assert!(matches!(cmd, ScriptCommand::Assign { .. }));
//! ```

use suntim_engine::RelocateMode;
use suntim_runtime::project::ProjectStatus;
use suntim_types::{ObjectId, PersonId, Role, SlotKey};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Insert an audit object with optional role capacities.
    Object {
        id: ObjectId,
        name: String,
        slots: Vec<(Role, usize)>,
    },
    /// Append a person to the roster.
    Person {
        id: PersonId,
        name: String,
        active: bool,
    },
    Assign {
        slot: SlotKey,
        person: PersonId,
    },
    /// Begin a drag; `None` source is the pool.
    Drag {
        person: PersonId,
        source: Option<SlotKey>,
    },
    DropSlot(SlotKey),
    DropGap(SlotKey),
    DropPool,
    Cancel,
    /// Relocate the occupant of `from`.
    Move {
        from: SlotKey,
        to: SlotKey,
        mode: RelocateMode,
    },
    /// Menu: move the occupant of `from` to another object.
    MoveTo {
        from: SlotKey,
        object: ObjectId,
        role: Role,
    },
    /// Menu: release.
    Release(SlotKey),
    /// Menu: change role.
    Role {
        from: SlotKey,
        role: Role,
    },
    /// Menu: swap with a person.
    Swap {
        from: SlotKey,
        other: PersonId,
    },
    /// `tail` picks the predecessor-tail offer instead of the gap itself.
    AddSlot {
        at: SlotKey,
        tail: bool,
    },
    DeleteSlot(SlotKey),
    Capacity {
        object: ObjectId,
        role: Role,
        capacity: usize,
    },
    RemoveObject(ObjectId),
    Sort,
    Title(String),
    Stage(ProjectStatus),
    Save,
    Undo,
    Redo,
    Show,
    Pool,
    Status,
    Offers(SlotKey),

    /// Blank line or comment.
    Empty,

    /// Line that could not be parsed.
    Invalid {
        input: String,
        reason: String,
    },
}

/// Stateless script parser.
pub struct ScriptParser;

impl ScriptParser {
    /// Parses one script line.
    ///
    /// Everything after `#` is a comment. Keywords are case-insensitive;
    /// ids are taken verbatim.
    ///
    /// | Input | Command |
    /// |-------|---------|
    /// | `object <id> <name...> [ROLE=N ...]` | Object |
    /// | `person <id> [inactive] [name...]` | Person |
    /// | `assign <object> <role> <ordinal> <person>` | Assign |
    /// | `drag <person> <slot\|pool>` | Drag |
    /// | `drop slot\|gap <object> <role> <ordinal>` | DropSlot / DropGap |
    /// | `drop pool` | DropPool |
    /// | `cancel` | Cancel |
    /// | `move <slot> <object> <role> <ordinal> [swap\|shift]` | Move |
    /// | `move-to <slot> <object> <role>` | MoveTo |
    /// | `release <slot>` | Release |
    /// | `role <slot> <role>` | Role |
    /// | `swap <slot> <person>` | Swap |
    /// | `add-slot <object> <role> <ordinal> [tail]` | AddSlot |
    /// | `del-slot <object> <role> <ordinal>` | DeleteSlot |
    /// | `capacity <object> <role> <n>` | Capacity |
    /// | `remove-object <id>` | RemoveObject |
    /// | `offers <object> <role> <ordinal>` | Offers |
    /// | `title <text...>` / `stage <status>` / `save` | project metadata |
    /// | `sort`, `undo`, `redo`, `show`, `pool`, `status` | as named |
    #[must_use]
    pub fn parse(line: &str) -> ScriptCommand {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return ScriptCommand::Empty;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let cmd = tokens[0].to_lowercase();
        let args = &tokens[1..];

        let parsed = match cmd.as_str() {
            "object" => parse_object(args),
            "person" => parse_person(args),
            "assign" => match args {
                [o, r, i, p] => slot(o, r, i).map(|slot| ScriptCommand::Assign {
                    slot,
                    person: PersonId::from(*p),
                }),
                _ => Err(usage("assign <object> <role> <ordinal> <person>")),
            },
            "drag" => match args {
                [p, src] => source(src).map(|source| ScriptCommand::Drag {
                    person: PersonId::from(*p),
                    source,
                }),
                _ => Err(usage("drag <person> <slot|pool>")),
            },
            "drop" => match args {
                [t] if t.eq_ignore_ascii_case("pool") => Ok(ScriptCommand::DropPool),
                [t, o, r, i] if t.eq_ignore_ascii_case("slot") => {
                    slot(o, r, i).map(ScriptCommand::DropSlot)
                }
                [t, o, r, i] if t.eq_ignore_ascii_case("gap") => {
                    slot(o, r, i).map(ScriptCommand::DropGap)
                }
                _ => Err(usage("drop slot|gap <object> <role> <ordinal> | drop pool")),
            },
            "cancel" => Ok(ScriptCommand::Cancel),
            "move" => parse_move(args),
            "move-to" => match args {
                [from, o, r] => key(from).and_then(|from| {
                    role(r).map(|role| ScriptCommand::MoveTo {
                        from,
                        object: ObjectId::from(*o),
                        role,
                    })
                }),
                _ => Err(usage("move-to <slot> <object> <role>")),
            },
            "release" => match args {
                [s] => key(s).map(ScriptCommand::Release),
                _ => Err(usage("release <slot>")),
            },
            "role" => match args {
                [s, r] => key(s).and_then(|from| role(r).map(|role| ScriptCommand::Role { from, role })),
                _ => Err(usage("role <slot> <role>")),
            },
            "swap" => match args {
                [s, p] => key(s).map(|from| ScriptCommand::Swap {
                    from,
                    other: PersonId::from(*p),
                }),
                _ => Err(usage("swap <slot> <person>")),
            },
            "add-slot" => match args {
                [o, r, i] => slot(o, r, i).map(|at| ScriptCommand::AddSlot { at, tail: false }),
                [o, r, i, t] if t.eq_ignore_ascii_case("tail") => {
                    slot(o, r, i).map(|at| ScriptCommand::AddSlot { at, tail: true })
                }
                _ => Err(usage("add-slot <object> <role> <ordinal> [tail]")),
            },
            "del-slot" => match args {
                [o, r, i] => slot(o, r, i).map(ScriptCommand::DeleteSlot),
                _ => Err(usage("del-slot <object> <role> <ordinal>")),
            },
            "capacity" => match args {
                [o, r, n] => role(r).and_then(|role| {
                    number(n).map(|capacity| ScriptCommand::Capacity {
                        object: ObjectId::from(*o),
                        role,
                        capacity,
                    })
                }),
                _ => Err(usage("capacity <object> <role> <n>")),
            },
            "remove-object" => match args {
                [o] => Ok(ScriptCommand::RemoveObject(ObjectId::from(*o))),
                _ => Err(usage("remove-object <id>")),
            },
            "offers" => match args {
                [o, r, i] => slot(o, r, i).map(ScriptCommand::Offers),
                _ => Err(usage("offers <object> <role> <ordinal>")),
            },
            "title" if !args.is_empty() => Ok(ScriptCommand::Title(args.join(" "))),
            "title" => Err(usage("title <text...>")),
            "stage" => match args {
                [s] => s
                    .parse()
                    .map(ScriptCommand::Stage)
                    .map_err(|e| e.to_string()),
                _ => Err(usage("stage <status>")),
            },
            "save" => Ok(ScriptCommand::Save),
            "sort" => Ok(ScriptCommand::Sort),
            "undo" => Ok(ScriptCommand::Undo),
            "redo" => Ok(ScriptCommand::Redo),
            "show" => Ok(ScriptCommand::Show),
            "pool" => Ok(ScriptCommand::Pool),
            "status" => Ok(ScriptCommand::Status),
            _ => Err(format!("unknown command '{cmd}'")),
        };

        parsed.unwrap_or_else(|reason| ScriptCommand::Invalid {
            input: line.to_string(),
            reason,
        })
    }
}

fn usage(form: &str) -> String {
    format!("usage: {form}")
}

fn role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: suntim_types::ParseRoleError| e.to_string())
}

fn number(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("not a number: {s}"))
}

fn slot(object: &str, r: &str, ordinal: &str) -> Result<SlotKey, String> {
    Ok(SlotKey::new(object, role(r)?, number(ordinal)?))
}

fn key(s: &str) -> Result<SlotKey, String> {
    s.parse().map_err(|e: suntim_types::ParseSlotKeyError| e.to_string())
}

fn source(s: &str) -> Result<Option<SlotKey>, String> {
    if s.eq_ignore_ascii_case("pool") {
        Ok(None)
    } else {
        key(s).map(Some)
    }
}

/// `object <id> <name...> [ROLE=N ...]`; capacities come last.
fn parse_object(args: &[&str]) -> Result<ScriptCommand, String> {
    let Some((id, rest)) = args.split_first() else {
        return Err(usage("object <id> <name...> [ROLE=N ...]"));
    };

    let split = rest
        .iter()
        .position(|t| t.contains('='))
        .unwrap_or(rest.len());
    let (name, caps) = rest.split_at(split);

    let slots = caps
        .iter()
        .map(|t| {
            let (r, n) = t
                .split_once('=')
                .ok_or_else(|| format!("expected ROLE=N, got {t}"))?;
            Ok((role(r)?, number(n)?))
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(ScriptCommand::Object {
        id: ObjectId::from(*id),
        name: name.join(" "),
        slots,
    })
}

/// `person <id> [inactive] [name...]`
fn parse_person(args: &[&str]) -> Result<ScriptCommand, String> {
    let Some((id, rest)) = args.split_first() else {
        return Err(usage("person <id> [inactive] [name...]"));
    };
    let (active, name) = match rest.split_first() {
        Some((flag, name)) if flag.eq_ignore_ascii_case("inactive") => (false, name),
        _ => (true, rest),
    };
    Ok(ScriptCommand::Person {
        id: PersonId::from(*id),
        name: name.join(" "),
        active,
    })
}

/// `move <slot> <object> <role> <ordinal> [swap|shift]`
fn parse_move(args: &[&str]) -> Result<ScriptCommand, String> {
    let (from, o, r, i, mode) = match args {
        [from, o, r, i] => (from, o, r, i, RelocateMode::Swap),
        [from, o, r, i, m] => {
            let mode = match m.to_lowercase().as_str() {
                "swap" => RelocateMode::Swap,
                "shift" | "insert" => RelocateMode::InsertShift,
                other => return Err(format!("unknown move mode '{other}'")),
            };
            (from, o, r, i, mode)
        }
        _ => return Err(usage("move <slot> <object> <role> <ordinal> [swap|shift]")),
    };
    Ok(ScriptCommand::Move {
        from: key(from)?,
        to: slot(o, r, i)?,
        mode,
    })
}
