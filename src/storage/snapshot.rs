//! JSON snapshot of a session, field-compatible with earlier saves
//!
//! Layout: `gameStarted`, `numPlayers`, `numHoles`, `players[{id,name}]`,
//! `currentHole`, and `scores` keyed by `"{playerId}-{hole}"`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::round::{GameSession, InvalidSession, Player, ScoreKey, ScoreTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub game_started: bool,
    pub num_players: u32,
    pub num_holes: u32,
    pub players: Vec<SnapshotPlayer>,
    pub current_hole: u32,
    /// Wider than a stroke count so oversized values from earlier saves still load
    pub scores: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPlayer {
    pub id: u32,
    pub name: String,
}

/// Why a stored snapshot could not be turned back into a session.
#[derive(Debug)]
pub enum SnapshotError {
    /// Not valid JSON, or the wrong shape
    Parse(serde_json::Error),
    /// A scores key that is not `"{playerId}-{hole}"`
    ScoreKey(String),
    /// Well-formed but breaks a session invariant
    Invalid(InvalidSession),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Parse(e) => write!(f, "malformed snapshot: {}", e),
            SnapshotError::ScoreKey(k) => write!(f, "malformed score key {:?}", k),
            SnapshotError::Invalid(e) => write!(f, "inconsistent snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Parse(e)
    }
}

impl From<InvalidSession> for SnapshotError {
    fn from(e: InvalidSession) -> Self {
        SnapshotError::Invalid(e)
    }
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let config = session.config();
        Snapshot {
            game_started: session.is_started(),
            num_players: config.num_players(),
            num_holes: config.num_holes(),
            players: session
                .players()
                .iter()
                .map(|p| SnapshotPlayer {
                    id: p.id,
                    name: p.name.clone(),
                })
                .collect(),
            current_hole: session.current_hole(),
            scores: session
                .scores()
                .iter()
                .map(|(key, strokes)| (key.to_string(), u64::from(strokes)))
                .collect(),
        }
    }

    pub fn into_session(self) -> Result<GameSession, SnapshotError> {
        let scores = self
            .scores
            .into_iter()
            .map(|(k, v)| {
                let strokes = u32::try_from(v).unwrap_or(u32::MAX);
                k.parse::<ScoreKey>()
                    .map(|key| (key, strokes))
                    .map_err(|_| SnapshotError::ScoreKey(k))
            })
            .collect::<Result<ScoreTable, _>>()?;

        let players = self
            .players
            .into_iter()
            .map(|p| Player { id: p.id, name: p.name })
            .collect();

        Ok(GameSession::from_parts(
            self.game_started,
            self.num_players,
            self.num_holes,
            players,
            self.current_hole,
            scores,
        )?)
    }

    pub fn to_json(&self) -> String {
        // Plain structs with string keys cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse stored JSON straight into a session.
pub fn decode(json: &str) -> Result<GameSession, SnapshotError> {
    Snapshot::from_json(json)?.into_session()
}

/// Serialize a session for storage.
pub fn encode(session: &GameSession) -> String {
    Snapshot::from_session(session).to_json()
}
