//! Project documents and their storage.
//!
//! A project document is the portable form of a session: audit objects,
//! the personnel roster, the assignment table and the review stage. It is
//! what gets exchanged between reviewers as a `.suntim` file.
//!
//! # Example
//!
//! ```
//! use suntim_engine::RosterState;
//! use suntim_runtime::project::{ProjectDocument, ProjectStatus};
//!
//! let doc = ProjectDocument::capture("LKPD", ProjectStatus::Final, &RosterState::default(), &[]);
//! assert!(doc.file_name().starts_with("SUNTIM_FINAL_"));
//!
//! let back = ProjectDocument::from_json(&doc.to_json()?)?;
//! assert_eq!(back, doc);
//! # Ok::<(), suntim_runtime::project::ProjectError>(())
//! ```

mod document;
mod error;
mod store;

pub use document::{
    ParseStatusError, ProjectDocument, ProjectStatus, DOCUMENT_VERSION, PROJECT_EXTENSION,
};
pub use error::ProjectError;
pub use store::ProjectStore;
