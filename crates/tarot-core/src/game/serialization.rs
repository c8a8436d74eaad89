use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::Session;
use crate::error::RuleError;
use crate::model::player::PlayerIndex;
use crate::model::round::Round;

/// Plain-data form of a [`Session`] handed to persistence backends.
///
/// Only inputs are stored; round scores and standings are recomputed on
/// [`SessionSnapshot::restore`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<String>,
    pub created_at: u64,
    #[serde(default)]
    pub dealer: PlayerIndex,
    pub rounds: Vec<Round>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        SessionSnapshot {
            id: session.id(),
            name: session.name().to_string(),
            players: session.players().to_vec(),
            created_at: session.created_at(),
            dealer: session.dealer(),
            rounds: session.rounds().to_vec(),
        }
    }

    pub fn restore(self) -> Result<Session, RuleError> {
        Session::from_parts(
            self.id,
            self.name,
            self.players,
            self.created_at,
            self.dealer,
            self.rounds,
        )
    }

    pub fn to_json(session: &Session) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
