//! Session file
//!
//! Keeps the CLI signed in between invocations.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Session;

/// Errors reading or writing the session file
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error on session file {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: serde_json::Error },
}

/// JSON file holding the current session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, `None` when signed out
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    error,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|error| SessionError::Corrupt {
                path: self.path.clone(),
                error,
            })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |error| SessionError::Io {
            path: self.path.clone(),
            error,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|error| SessionError::Corrupt {
            path: self.path.clone(),
            error,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;

        tracing::debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    /// Remove the stored session; a missing file is not an error
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::Io {
                path: self.path.clone(),
                error,
            }),
        }
    }
}
