//! Round state: configuration, players, scores, and the transitions on them
//!
//! `GameSession` is the single owner of the score table. Every mutation goes
//! through one of its transition methods; totals, progress, and the
//! leaderboard are derived on each read.

pub mod engine;
pub mod ranking;
pub mod score;
pub mod undo;

pub use ranking::Standing;
pub use score::{parse_strokes, ScoreKey, ScoreTable};
pub use undo::{UndoBuffer, UndoRecord};

use std::fmt;

/// Smallest and largest supported field sizes
pub const MIN_PLAYERS: u32 = 1;
pub const MAX_PLAYERS: u32 = 4;

/// Player count offered before any config is applied
pub const DEFAULT_PLAYERS: u32 = 2;

/// Round length: a front nine or a full eighteen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoleCount {
    Nine,
    #[default]
    Eighteen,
}

impl HoleCount {
    pub fn count(self) -> u32 {
        match self {
            HoleCount::Nine => 9,
            HoleCount::Eighteen => 18,
        }
    }

    /// Exact match only; used when reading saved data.
    pub fn from_count(n: u32) -> Option<Self> {
        match n {
            9 => Some(HoleCount::Nine),
            18 => Some(HoleCount::Eighteen),
            _ => None,
        }
    }

    /// Closest supported length, for user-supplied defaults.
    pub fn nearest(n: u32) -> Self {
        if n <= 13 {
            HoleCount::Nine
        } else {
            HoleCount::Eighteen
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HoleCount::Nine => HoleCount::Eighteen,
            HoleCount::Eighteen => HoleCount::Nine,
        }
    }
}

/// Field size and round length, fixed once play starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    num_players: u32,
    pub holes: HoleCount,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            num_players: DEFAULT_PLAYERS,
            holes: HoleCount::default(),
        }
    }
}

impl RoundConfig {
    /// Build a config, clamping the player count into range.
    pub fn new(num_players: u32, holes: HoleCount) -> Self {
        RoundConfig {
            num_players: num_players.clamp(MIN_PLAYERS, MAX_PLAYERS),
            holes,
        }
    }

    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    pub fn num_holes(&self) -> u32 {
        self.holes.count()
    }

    pub fn with_players(self, num_players: u32) -> Self {
        RoundConfig::new(num_players, self.holes)
    }
}

/// A participant. Ids run 1..=num_players with no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub name: String,
}

impl Player {
    fn numbered(id: u32) -> Self {
        Player {
            id,
            name: format!("Player {}", id),
        }
    }
}

/// Result of a score edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEdit {
    /// Value stored; `previous` is what the undo buffer now holds.
    Applied { value: u32, previous: Option<u32> },
    /// Negative input. Nothing changed.
    Rejected,
    /// No round in progress, or the cell is outside the round. Nothing changed.
    Ignored,
}

/// Reasons restored data cannot become a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSession {
    PlayerCount(u32),
    HoleCount(u32),
    /// Player ids must be exactly 1..=num_players, in order
    PlayerIds,
    ScoreOutOfRange(ScoreKey),
    CurrentHole(u32),
}

impl fmt::Display for InvalidSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSession::PlayerCount(n) => {
                write!(f, "player count {} outside {}..={}", n, MIN_PLAYERS, MAX_PLAYERS)
            }
            InvalidSession::HoleCount(n) => write!(f, "unsupported hole count {}", n),
            InvalidSession::PlayerIds => write!(f, "player ids are not 1..=numPlayers"),
            InvalidSession::ScoreOutOfRange(key) => {
                write!(f, "score {} refers to a player or hole outside the round", key)
            }
            InvalidSession::CurrentHole(h) => write!(f, "current hole {} outside the round", h),
        }
    }
}

impl std::error::Error for InvalidSession {}

/// Everything that makes up one round of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    started: bool,
    config: RoundConfig,
    players: Vec<Player>,
    current_hole: u32,
    scores: ScoreTable,
    undo: UndoBuffer,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(RoundConfig::default())
    }
}

impl GameSession {
    /// A session sitting at setup with the given choices.
    pub fn new(config: RoundConfig) -> Self {
        GameSession {
            started: false,
            config,
            players: Vec::new(),
            current_hole: 1,
            scores: ScoreTable::new(),
            undo: UndoBuffer::new(),
        }
    }

    /// Rebuild a session from saved parts, checking every invariant.
    ///
    /// When `started` is false only the config is kept. The undo buffer
    /// always starts empty.
    pub fn from_parts(
        started: bool,
        num_players: u32,
        num_holes: u32,
        players: Vec<Player>,
        current_hole: u32,
        scores: ScoreTable,
    ) -> Result<Self, InvalidSession> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(InvalidSession::PlayerCount(num_players));
        }
        let holes = HoleCount::from_count(num_holes).ok_or(InvalidSession::HoleCount(num_holes))?;
        let config = RoundConfig::new(num_players, holes);

        if !started {
            return Ok(GameSession::new(config));
        }

        let ids_ok = players.len() == num_players as usize
            && players.iter().zip(1..).all(|(p, expected)| p.id == expected);
        if !ids_ok {
            return Err(InvalidSession::PlayerIds);
        }

        if let Some((key, _)) = scores
            .iter()
            .find(|(k, _)| !(1..=num_players).contains(&k.player_id) || !(1..=num_holes).contains(&k.hole))
        {
            return Err(InvalidSession::ScoreOutOfRange(key));
        }

        if !(1..=num_holes).contains(&current_hole) {
            return Err(InvalidSession::CurrentHole(current_hole));
        }

        Ok(GameSession {
            started,
            config,
            players,
            current_hole,
            scores,
            undo: UndoBuffer::new(),
        })
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_hole(&self) -> u32 {
        self.current_hole
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn undo_record(&self) -> Option<&UndoRecord> {
        self.undo.peek()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Change the setup choices. Has no effect once a round is under way.
    pub fn set_config(&mut self, config: RoundConfig) {
        if !self.started {
            self.config = config;
        }
    }

    /// Begin a round: numbered players, empty table, hole 1, nothing to undo.
    pub fn start_round(&mut self, config: RoundConfig) {
        self.config = config;
        self.players = (1..=config.num_players()).map(Player::numbered).collect();
        self.scores.clear();
        self.current_hole = 1;
        self.undo.clear();
        self.started = true;
    }

    /// Record strokes for one cell from raw entry text.
    ///
    /// Non-numeric text is stored as 0. Negative values are rejected without
    /// touching the table or the undo buffer.
    pub fn set_score(&mut self, player_id: u32, hole: u32, raw: &str) -> ScoreEdit {
        if !self.started || !self.contains_cell(player_id, hole) {
            return ScoreEdit::Ignored;
        }
        let Some(value) = parse_strokes(raw) else {
            return ScoreEdit::Rejected;
        };

        let previous = self.scores.get(player_id, hole);
        self.undo.record(UndoRecord { player_id, hole, previous });
        self.scores.set(player_id, hole, value);
        ScoreEdit::Applied { value, previous }
    }

    /// Roll back the last score edit, once.
    pub fn undo(&mut self) -> Option<UndoRecord> {
        self.undo.apply(&mut self.scores)
    }

    /// Drop the round and return to setup, keeping the setup choices.
    pub fn reset(&mut self) {
        self.started = false;
        self.players.clear();
        self.scores.clear();
        self.current_hole = 1;
        self.undo.clear();
    }

    /// Move the hole cursor, clamped to the round. Returns true if it moved.
    pub fn set_current_hole(&mut self, hole: u32) -> bool {
        let hole = hole.clamp(1, self.config.num_holes());
        let moved = hole != self.current_hole;
        self.current_hole = hole;
        moved
    }

    pub fn total_for(&self, player_id: u32) -> u32 {
        engine::total_for(&self.scores, player_id, self.config.num_holes())
    }

    pub fn through_for(&self, player_id: u32) -> u32 {
        engine::through_for(&self.scores, player_id, self.config.num_holes())
    }

    /// Players in leaderboard order.
    pub fn leaderboard(&self) -> Vec<Standing> {
        let standings = self
            .players
            .iter()
            .map(|p| Standing {
                player_id: p.id,
                name: p.name.clone(),
                total: self.total_for(p.id),
                through: self.through_for(p.id),
            })
            .collect();
        ranking::rank(standings)
    }

    fn contains_cell(&self, player_id: u32, hole: u32) -> bool {
        self.players.iter().any(|p| p.id == player_id) && (1..=self.config.num_holes()).contains(&hole)
    }
}
