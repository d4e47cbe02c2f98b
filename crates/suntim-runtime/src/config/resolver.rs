//! Overrides applied after file and environment layers.
//!
//! ```text
//! ConfigLoader.load()  →  SuntimConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     SuntimConfig (final)
//! ```

use super::SuntimConfig;

/// Applies overrides to a loaded configuration.
///
/// The CLI implements this for its flags. Only explicitly given values
/// should be written.
pub trait ConfigResolver {
    fn apply(&self, config: &mut SuntimConfig);
}
