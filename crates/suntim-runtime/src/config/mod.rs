//! Layered configuration.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌────────────────────────────────────────────┐
//! │  1. CLI flags (ConfigResolver)             │  Invocation override
//! ├────────────────────────────────────────────┤
//! │  2. Environment Variables (SUNTIM_*)       │  Runtime override
//! ├────────────────────────────────────────────┤
//! │  3. Project Config (.suntim/config.toml)   │  Project-specific
//! ├────────────────────────────────────────────┤
//! │  4. Global Config (~/.suntim/config.toml)  │  User defaults
//! ├────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)          │  Fallback
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Config vs Project Separation
//!
//! | Aspect | Config | Project |
//! |--------|--------|---------|
//! | Format | TOML | JSON (`.suntim`) |
//! | Scope | Global / working directory | One roster |
//! | Contents | Undo depth, placement policy | Objects, examiners, assignments |
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `SUNTIM_DEBUG` | `debug` | bool |
//! | `SUNTIM_HISTORY_CAPACITY` | `history.capacity` | usize |
//! | `SUNTIM_GROW_ON_ROLE_CHANGE` | `placement.grow_on_role_change` | bool |
//! | `SUNTIM_PROJECT_DIR` | `paths.project_dir` | PathBuf |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.suntim/config.toml
//! debug = false
//!
//! [history]
//! capacity = 50
//!
//! [placement]
//! grow_on_role_change = true
//! grow_on_move = false
//! offer_predecessor_tail = true
//!
//! [paths]
//! project_dir = "~/Documents/suntim"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{HistoryConfig, PathsConfig, PlacementConfig, SuntimConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".suntim")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".suntim";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
