//! The fixed catalog of team roles.
//!
//! Roles are ordered from the most senior (`PJ`) to audit support
//! (`Dukrik`). The order is significant: slots are listed in role order,
//! and a slot insertion at ordinal 0 of a role borders the tail of its
//! [`predecessor`](Role::predecessor).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A team function with a per-object slot capacity.
///
/// Serialized as its stable [`key`](Role::key), so capacity maps read
/// `{"PJ": 1, "KT": 1, "AT": 6}` on disk.
///
/// # Example
///
/// ```
/// use suntim_types::Role;
///
/// assert_eq!(Role::Kt.key(), "KT");
/// assert_eq!(Role::Kt.predecessor(), Some(Role::Pt));
/// assert!(Role::Kt.is_technical());
/// assert_eq!("dkr".parse::<Role>(), Ok(Role::Dukrik));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Penanggung Jawab (person in charge).
    #[serde(rename = "PJ")]
    Pj,
    /// Wakil Penanggung Jawab (deputy person in charge).
    #[serde(rename = "WPJ")]
    Wpj,
    /// Pengendali Teknis (technical controller).
    #[serde(rename = "PT")]
    Pt,
    /// Ketua Tim (team leader).
    #[serde(rename = "KT")]
    Kt,
    /// Ketua Sub Tim (sub-team leader).
    #[serde(rename = "KST")]
    Kst,
    /// Anggota Tim (team member).
    #[serde(rename = "AT")]
    At,
    /// Dukungan Pemeriksaan (audit support).
    #[serde(rename = "Dukrik")]
    Dukrik,
}

impl Role {
    /// Every role, in catalog order.
    pub const ALL: [Role; 7] = [
        Role::Pj,
        Role::Wpj,
        Role::Pt,
        Role::Kt,
        Role::Kst,
        Role::At,
        Role::Dukrik,
    ];

    /// Stable key used in slot keys and on disk.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Pj => "PJ",
            Self::Wpj => "WPJ",
            Self::Pt => "PT",
            Self::Kt => "KT",
            Self::Kst => "KST",
            Self::At => "AT",
            Self::Dukrik => "Dukrik",
        }
    }

    /// Short display form.
    #[must_use]
    pub fn short(self) -> &'static str {
        match self {
            Self::Dukrik => "DKR",
            other => other.key(),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pj => "Penanggung Jawab",
            Self::Wpj => "Wakil Penanggung Jawab",
            Self::Pt => "Pengendali Teknis",
            Self::Kt => "Ketua Tim",
            Self::Kst => "Ketua Sub Tim",
            Self::At => "Anggota Tim",
            Self::Dukrik => "Dukungan Pemeriksaan",
        }
    }

    /// Whether the role counts as technical staff in analytics.
    ///
    /// The engine's invariants do not depend on this flag.
    #[must_use]
    pub fn is_technical(self) -> bool {
        matches!(self, Self::Kt | Self::Kst | Self::At | Self::Dukrik)
    }

    /// Position in [`Role::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The role immediately before this one in catalog order.
    #[must_use]
    pub fn predecessor(self) -> Option<Role> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string names no role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the key or the short form, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s) || r.short().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
