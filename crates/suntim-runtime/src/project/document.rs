//! The `.suntim` project document.

use super::ProjectError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use suntim_engine::{AssignmentTable, AuditObject, Person, RosterState};
use thiserror::Error;

/// Document format version written by this crate.
pub const DOCUMENT_VERSION: &str = "1.0";

/// File extension of project documents.
pub const PROJECT_EXTENSION: &str = "suntim";

/// Review stage of a team proposal.
///
/// Stages run from the first draft to the issued assignment letter.
/// The short code appears in exported file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Draft proposal of the DAC team.
    #[default]
    Draft,
    /// Reviewed by the senior examiner.
    ReviewMadya,
    /// Reviewed by the head of the audit division.
    ReviewKabid,
    /// Reviewed by the head of the regional office.
    ReviewKalan,
    /// Assignment letter issued.
    Final,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        Self::Draft,
        Self::ReviewMadya,
        Self::ReviewKabid,
        Self::ReviewKalan,
        Self::Final,
    ];

    /// Stable id, as serialized.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ReviewMadya => "review_madya",
            Self::ReviewKabid => "review_kabid",
            Self::ReviewKalan => "review_kalan",
            Self::Final => "final",
        }
    }

    #[must_use]
    pub fn short_code(self) -> &'static str {
        match self {
            Self::Draft => "DraftDAC",
            Self::ReviewMadya => "RevMadya",
            Self::ReviewKabid => "RevKabid",
            Self::ReviewKalan => "RevKalan",
            Self::Final => "FINAL",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ProjectStatus {
    type Err = ParseStatusError;

    /// Accepts the id or the short code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.id().eq_ignore_ascii_case(s) || st.short_code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A saved project: the roster, the personnel list and review metadata.
///
/// # JSON Shape
///
/// ```text
/// {
///   "version": "1.0",
///   "projectTitle": "...",
///   "status": "review_kabid",
///   "timestamp": "2024-05-01T08:30:00Z",
///   "objects": [ { "id", "name", "slots": { "KT": 1, "AT": 4 } } ],
///   "examiners": [ { "id", "name", "active" } ],
///   "assignments": { "O1:KT:0": "p1" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub version: String,

    #[serde(rename = "projectTitle", default)]
    pub title: String,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(rename = "timestamp")]
    pub saved_at: DateTime<Utc>,

    #[serde(default)]
    pub objects: Vec<AuditObject>,

    #[serde(default)]
    pub examiners: Vec<Person>,

    #[serde(default)]
    pub assignments: AssignmentTable,
}

impl ProjectDocument {
    /// Captures `state` and `people` as of now.
    #[must_use]
    pub fn capture(
        title: impl Into<String>,
        status: ProjectStatus,
        state: &RosterState,
        people: &[Person],
    ) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            title: title.into(),
            status,
            saved_at: Utc::now(),
            objects: state.objects.clone(),
            examiners: people.to_vec(),
            assignments: state.assignments.clone(),
        }
    }

    #[must_use]
    pub fn with_saved_at(mut self, saved_at: DateTime<Utc>) -> Self {
        self.saved_at = saved_at;
        self
    }

    /// Splits the document into a roster state and a personnel list.
    #[must_use]
    pub fn into_parts(self) -> (RosterState, Vec<Person>) {
        let state = RosterState {
            objects: self.objects,
            assignments: self.assignments,
        };
        (state, self.examiners)
    }

    /// Export file name: `SUNTIM_{short}_{YYYY-MM-DD_HHMMSS}.suntim`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "SUNTIM_{}_{}.{PROJECT_EXTENSION}",
            self.status.short_code(),
            self.saved_at.format("%Y-%m-%d_%H%M%S")
        )
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document and checks its major version.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Serialization`] for malformed JSON,
    /// [`ProjectError::VersionIncompatible`] for another major version.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let doc: Self = serde_json::from_str(json)?;
        if major(&doc.version) != major(DOCUMENT_VERSION) {
            return Err(ProjectError::VersionIncompatible {
                file_version: doc.version,
                supported_version: DOCUMENT_VERSION,
            });
        }
        Ok(doc)
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
