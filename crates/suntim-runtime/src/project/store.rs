//! File-based project storage.
//!
//! Documents are stored as pretty JSON under a project directory, named
//! after their review stage and save time:
//!
//! ```text
//! ~/.suntim/projects/
//! ├── SUNTIM_DraftDAC_2024-04-29_101500.suntim
//! ├── SUNTIM_RevKabid_2024-05-01_083005.suntim
//! └── ...
//! ```

use super::{ProjectDocument, ProjectError, PROJECT_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A directory of project documents.
///
/// # Example
///
/// ```no_run
/// use suntim_engine::RosterState;
/// use suntim_runtime::project::{ProjectDocument, ProjectStatus, ProjectStore};
///
/// let store = ProjectStore::new("/tmp/suntim-projects")?;
/// let doc = ProjectDocument::capture("LKPD 2024", ProjectStatus::Draft, &RosterState::default(), &[]);
/// let path = store.save(&doc)?;
/// let loaded = ProjectStore::load(&path)?;
/// assert_eq!(loaded.title, "LKPD 2024");
/// # Ok::<(), suntim_runtime::project::ProjectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProjectStore {
    base_path: PathBuf,
}

impl ProjectStore {
    /// Opens `base_path`, creating it if needed. A leading `~/` is
    /// expanded to the home directory.
    ///
    /// # Errors
    ///
    /// [`ProjectError::DirectoryCreation`] if the directory cannot be created.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let base_path = expand_tilde(&base_path.into());
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| ProjectError::directory_creation(&base_path, e))?;
        }
        Ok(Self { base_path })
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Saves `doc` under its [`file_name`](ProjectDocument::file_name).
    ///
    /// A name already taken in the directory gets a `_2`, `_3`, ...
    /// suffix, so saves within the same second never overwrite each other.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Io`] or [`ProjectError::Serialization`].
    pub fn save(&self, doc: &ProjectDocument) -> Result<PathBuf, ProjectError> {
        let path = self.free_path(&doc.file_name());
        Self::save_to(doc, &path)?;
        Ok(path)
    }

    fn free_path(&self, name: &str) -> PathBuf {
        let path = self.base_path.join(name);
        if !path.exists() {
            return path;
        }
        let suffix = format!(".{PROJECT_EXTENSION}");
        let stem = name.strip_suffix(&suffix).unwrap_or(name);
        (2u32..)
            .map(|n| self.base_path.join(format!("{stem}_{n}{suffix}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(path)
    }

    /// Writes `doc` to `path` through a temp file and a rename.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Io`] or [`ProjectError::Serialization`].
    pub fn save_to(doc: &ProjectDocument, path: &Path) -> Result<(), ProjectError> {
        let json = doc.to_json()?;
        let temp = temp_path(path);

        fs::write(&temp, json)?;
        fs::rename(&temp, path)?;

        info!(
            path = %path.display(),
            status = %doc.status,
            objects = doc.objects.len(),
            "project saved"
        );
        Ok(())
    }

    /// Reads and validates the document at `path`.
    ///
    /// # Errors
    ///
    /// [`ProjectError::NotFound`] if the file is missing, otherwise any
    /// error from [`ProjectDocument::from_json`].
    pub fn load(path: &Path) -> Result<ProjectDocument, ProjectError> {
        if !path.exists() {
            return Err(ProjectError::not_found(path));
        }
        let json = fs::read_to_string(path)?;
        let doc = ProjectDocument::from_json(&json)?;
        info!(
            path = %path.display(),
            version = %doc.version,
            status = %doc.status,
            "project loaded"
        );
        Ok(doc)
    }

    /// Documents in the directory, most recently saved first.
    ///
    /// Files that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Io`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<(PathBuf, ProjectDocument)>, ProjectError> {
        let mut docs = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_EXTENSION) {
                continue;
            }
            if is_hidden(&path) {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(ProjectError::from)
                .and_then(|json| ProjectDocument::from_json(&json))
            {
                Ok(doc) => docs.push((path, doc)),
                Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable project"),
            }
        }
        docs.sort_by(|a, b| b.1.saved_at.cmp(&a.1.saved_at));
        Ok(docs)
    }

    /// The newest document in the directory, if any.
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    pub fn latest(&self) -> Result<Option<(PathBuf, ProjectDocument)>, ProjectError> {
        Ok(self.list()?.into_iter().next())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// `dir/.name.tmp` next to `path`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
