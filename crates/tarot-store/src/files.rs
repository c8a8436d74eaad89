use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tarot_core::game::store::sort_headers;
use tarot_core::{Session, SessionHeader, SessionSnapshot, SessionStore, StoreError};
use tracing::{Level, event};
use uuid::Uuid;

use crate::config::{DEFAULT_MAX_FILE_BYTES, StoreConfig};

const EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// One pretty-printed JSON snapshot per session under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileStore {
    root: PathBuf,
    max_file_bytes: u64,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.resolved_root()).with_max_file_bytes(config.max_file_bytes)
    }

    pub fn with_max_file_bytes(mut self, limit: u64) -> Self {
        self.max_file_bytes = limit;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.{EXTENSION}"))
    }

    fn read_snapshot(&self, path: &Path) -> Result<SessionSnapshot, StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(io_err)?.len();
        if size > self.max_file_bytes {
            return Err(StoreError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.max_file_bytes,
            });
        }
        let json = fs::read_to_string(path).map_err(io_err)?;
        Ok(SessionSnapshot::from_json(&json)?)
    }

    fn read_header(&self, path: &Path) -> Result<SessionHeader, StoreError> {
        let session = self.read_snapshot(path)?.restore()?;
        Ok(session.header())
    }
}

impl SessionStore for LocalFileStore {
    fn list_headers(&self) -> Result<Vec<SessionHeader>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut headers = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io {
                    path: self.root.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }

            match self.read_header(&path) {
                Ok(header) => headers.push(header),
                Err(err) => event!(
                    target: "tarot_store::files",
                    Level::WARN,
                    path = %path.display(),
                    error = %err,
                    message = "skipping unreadable session file"
                ),
            }
        }

        sort_headers(&mut headers);
        Ok(headers)
    }

    fn load(&self, id: Uuid) -> Result<Session, StoreError> {
        let path = self.path_for(id);
        let snapshot = match self.read_snapshot(&path) {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id));
            }
            other => other?,
        };
        let session = snapshot.restore()?;
        event!(
            target: "tarot_store::files",
            Level::DEBUG,
            session = %id,
            rounds = session.round_count(),
            message = "loaded session"
        );
        Ok(session)
    }

    fn save(&mut self, session: &Session) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.path_for(session.id());
        let temp = self.root.join(format!("{}.{TEMP_EXTENSION}", session.id()));
        let json = SessionSnapshot::to_json(session)?;
        fs::write(&temp, json).map_err(|source| StoreError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        event!(
            target: "tarot_store::files",
            Level::INFO,
            session = %session.id(),
            rounds = session.round_count(),
            path = %path.display(),
            message = "saved session"
        );
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                event!(
                    target: "tarot_store::files",
                    Level::INFO,
                    session = %id,
                    message = "deleted session"
                );
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
