//! Unified error interface for SUNTIM.
//!
//! Every error type surfaced to the UI layer implements [`ErrorCode`] so
//! the caller can pick a user-visible message by a stable code instead of
//! matching on enum variants from several crates.
//!
//! # Example
//!
//! ```
//! use suntim_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum PlacementError {
//!     Occupied,
//!     UnknownObject(String),
//! }
//!
//! impl ErrorCode for PlacementError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Occupied => "PLACEMENT_OCCUPIED",
//!             Self::UnknownObject(_) => "PLACEMENT_UNKNOWN_OBJECT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Occupied)
//!     }
//! }
//!
//! let err = PlacementError::Occupied;
//! assert_eq!(err.code(), "PLACEMENT_OCCUPIED");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error classification.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"ENGINE_SLOT_OCCUPIED"`
/// - **Prefixed by layer**: `ENGINE_`, `SESSION_`, `PROJECT_`
/// - **Stable**: codes are part of the contract with the UI layer
///
/// # Recoverability
///
/// An error is recoverable when the user can take a different action that
/// succeeds against the same state: choosing swap instead of assign, growing
/// a role's capacity, picking another slot. Errors caused by stale or
/// malformed references are not recoverable; retrying the same call gives
/// the same result because every engine operation is deterministic.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether a different user action may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows SUNTIM conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use suntim_types::{assert_error_code, ErrorCode};
///
/// struct Full;
///
/// impl ErrorCode for Full {
///     fn code(&self) -> &'static str { "ENGINE_CAPACITY_FULL" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Full, "ENGINE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every variant of an error enum at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
