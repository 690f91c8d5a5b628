//! JSON file implementation of the cursor store.
//!
//! The document is written to a sibling temporary file and renamed over the
//! previous one, so a crash mid-write leaves the last complete state behind.

use std::io::{self, ErrorKind};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cursor_state::{CursorState, CursorStore};
use super::error::PersistenceError;

/// Cursor file used when none is configured.
pub const DEFAULT_CURSOR_FILE: &str = ".spam-sweeper/cursors.json";

#[derive(Debug, Deserialize)]
struct CursorDocument {
    #[serde(default)]
    cursors: CursorState,
}

#[derive(Debug, Serialize)]
struct CursorDocumentRef<'state> {
    updated_at: DateTime<Utc>,
    cursors: &'state CursorState,
}

/// Cursor store persisted as a JSON object keyed by container kind.
///
/// ```json
/// {
///   "updated_at": "2026-10-19T08:00:00Z",
///   "cursors": { "discussion": "Y3Vyc29yOnYyOpHOAAx", "issue": "Y3Vyc29yOnYyOpHOAB2" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileCursorStore {
    path: Utf8PathBuf,
}

impl JsonFileCursorStore {
    /// Creates a store backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cursor file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn location(&self) -> Result<(&Utf8Path, &str), PersistenceError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| PersistenceError::InvalidPath {
                path: self.path.to_string(),
            })?;
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        Ok((parent, file_name))
    }

    fn read_failed(&self, error: &io::Error) -> PersistenceError {
        PersistenceError::ReadFailed {
            path: self.path.to_string(),
            message: error.to_string(),
        }
    }

    fn write_failed(&self, error: &impl ToString) -> PersistenceError {
        PersistenceError::WriteFailed {
            path: self.path.to_string(),
            message: error.to_string(),
        }
    }
}

impl CursorStore for JsonFileCursorStore {
    fn load(&self) -> Result<CursorState, PersistenceError> {
        let (parent, file_name) = self.location()?;

        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(CursorState::default());
            }
            Err(error) => return Err(self.read_failed(&error)),
        };

        let content = match dir.read_to_string(file_name) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(CursorState::default());
            }
            Err(error) => return Err(self.read_failed(&error)),
        };

        if content.trim().is_empty() {
            return Ok(CursorState::default());
        }

        serde_json::from_str::<CursorDocument>(&content)
            .map(|document| document.cursors)
            .map_err(|error| PersistenceError::ParseFailed {
                path: self.path.to_string(),
                message: error.to_string(),
            })
    }

    fn save(&self, state: &CursorState) -> Result<(), PersistenceError> {
        let (parent, file_name) = self.location()?;

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|error| self.write_failed(&error))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| self.write_failed(&error))?;

        let document = CursorDocumentRef {
            updated_at: Utc::now(),
            cursors: state,
        };
        let json =
            serde_json::to_string_pretty(&document).map_err(|error| self.write_failed(&error))?;

        let temp_name = format!("{file_name}.tmp");
        dir.write(temp_name.as_str(), json)
            .map_err(|error| self.write_failed(&error))?;
        dir.rename(temp_name.as_str(), &dir, file_name)
            .map_err(|error| self.write_failed(&error))
    }
}
