//! Persistence seam for scoring sessions.
//!
//! The core never touches the filesystem; backends implement
//! [`SessionStore`] and exchange [`SessionSnapshot`] values with it.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::serialization::SessionSnapshot;
use super::session::Session;
use crate::error::RuleError;

/// Light summary of a stored session, cheap enough to list every game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    pub id: Uuid,
    pub name: String,
    pub created_at: u64,
    /// Player names paired with their final totals.
    pub scores: Vec<(String, i32)>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(Uuid),
    #[error("{path:?} is {size} bytes, above the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode or decode session: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored session is invalid: {0}")]
    Rule(#[from] RuleError),
}

/// Load/save/list/delete capability used by callers that keep sessions
/// between runs.
pub trait SessionStore {
    /// Every readable session, newest first.
    fn list_headers(&self) -> Result<Vec<SessionHeader>, StoreError>;

    fn load(&self, id: Uuid) -> Result<Session, StoreError>;

    /// Inserts or overwrites the session with the same id.
    fn save(&mut self, session: &Session) -> Result<(), StoreError>;

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError>;
}

/// Newest first; ties broken by name so listings are stable.
pub fn sort_headers(headers: &mut [SessionHeader]) {
    headers.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// In-process store holding snapshots in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: HashMap<Uuid, SessionSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn list_headers(&self) -> Result<Vec<SessionHeader>, StoreError> {
        let mut headers = self
            .sessions
            .values()
            .cloned()
            .map(|snapshot| snapshot.restore().map(|session| session.header()))
            .collect::<Result<Vec<_>, _>>()?;
        sort_headers(&mut headers);
        Ok(headers)
    }

    fn load(&self, id: Uuid) -> Result<Session, StoreError> {
        let snapshot = self.sessions.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(snapshot.clone().restore()?)
    }

    fn save(&mut self, session: &Session) -> Result<(), StoreError> {
        self.sessions
            .insert(session.id(), SessionSnapshot::capture(session));
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
