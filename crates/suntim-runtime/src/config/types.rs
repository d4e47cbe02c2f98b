//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use suntim_engine::CapacityGrowth;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers. Every
/// field is optional in a config file.
///
/// # Example
///
/// ```
/// use suntim_runtime::config::SuntimConfig;
///
/// let config = SuntimConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.history.capacity, 50);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuntimConfig {
    /// Debug logging.
    pub debug: bool,

    pub history: HistoryConfig,

    pub placement: PlacementConfig,

    pub paths: PathsConfig,
}

impl SuntimConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.history.merge(&other.history);
        self.placement.merge(&other.placement);
        self.paths.merge(&other.paths);
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept, baseline included.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

impl HistoryConfig {
    fn merge(&mut self, other: &Self) {
        if other.capacity != Self::default().capacity {
            self.capacity = other.capacity;
        }
    }

    /// Capacity clamped to at least one snapshot.
    #[must_use]
    pub fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }
}

/// How placements behave when the target role is full, and which slot
/// insertions the UI offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// A role change into a full role adds a slot instead of failing.
    pub grow_on_role_change: bool,

    /// A menu move into a full role adds a slot instead of failing.
    pub grow_on_move: bool,

    /// Inserting at ordinal 0 also offers the previous role's tail.
    pub offer_predecessor_tail: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grow_on_role_change: true,
            grow_on_move: false,
            offer_predecessor_tail: true,
        }
    }
}

impl PlacementConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.grow_on_role_change != default.grow_on_role_change {
            self.grow_on_role_change = other.grow_on_role_change;
        }
        if other.grow_on_move != default.grow_on_move {
            self.grow_on_move = other.grow_on_move;
        }
        if other.offer_predecessor_tail != default.offer_predecessor_tail {
            self.offer_predecessor_tail = other.offer_predecessor_tail;
        }
    }

    #[must_use]
    pub fn role_change_growth(&self) -> CapacityGrowth {
        growth(self.grow_on_role_change)
    }

    #[must_use]
    pub fn move_growth(&self) -> CapacityGrowth {
        growth(self.grow_on_move)
    }
}

fn growth(allow: bool) -> CapacityGrowth {
    if allow {
        CapacityGrowth::Allow
    } else {
        CapacityGrowth::Deny
    }
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Where project files are saved when no explicit path is given.
    pub project_dir: Option<PathBuf>,
}

impl PathsConfig {
    fn merge(&mut self, other: &Self) {
        if other.project_dir.is_some() {
            self.project_dir = other.project_dir.clone();
        }
    }

    /// Returns the project directory, falling back to `~/.suntim/projects`.
    #[must_use]
    pub fn project_dir_or_default(&self) -> PathBuf {
        self.project_dir
            .clone()
            .unwrap_or_else(|| super::default_config_dir().join("projects"))
    }
}
