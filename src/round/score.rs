//! Score table: stroke counts keyed by (player, hole)

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Composite key for one cell of the scorecard.
///
/// Persisted as `"{player_id}-{hole}"`, the format older saves use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoreKey {
    pub player_id: u32,
    pub hole: u32,
}

impl ScoreKey {
    pub fn new(player_id: u32, hole: u32) -> Self {
        ScoreKey { player_id, hole }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.player_id, self.hole)
    }
}

/// Error parsing a persisted score key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScoreKeyError(pub String);

impl fmt::Display for ParseScoreKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid score key: {:?}", self.0)
    }
}

impl std::error::Error for ParseScoreKeyError {}

impl FromStr for ScoreKey {
    type Err = ParseScoreKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScoreKeyError(s.to_string());
        let (player, hole) = s.split_once('-').ok_or_else(err)?;
        let player_id = player.parse::<u32>().map_err(|_| err())?;
        let hole = hole.parse::<u32>().map_err(|_| err())?;
        Ok(ScoreKey { player_id, hole })
    }
}

/// Stroke counts for a round. A missing key means "not yet entered",
/// which is not the same thing as a stored zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    entries: BTreeMap<ScoreKey, u32>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player_id: u32, hole: u32) -> Option<u32> {
        self.entries.get(&ScoreKey::new(player_id, hole)).copied()
    }

    /// Store a value and return whatever was there before.
    pub fn set(&mut self, player_id: u32, hole: u32, strokes: u32) -> Option<u32> {
        self.entries.insert(ScoreKey::new(player_id, hole), strokes)
    }

    pub fn remove(&mut self, player_id: u32, hole: u32) -> Option<u32> {
        self.entries.remove(&ScoreKey::new(player_id, hole))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreKey, u32)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(ScoreKey, u32)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (ScoreKey, u32)>>(iter: I) -> Self {
        ScoreTable {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Parse raw score-entry text the lenient way a number field reports it.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits. No digits at all counts as 0. Returns `None` when the value
/// is negative, which callers must treat as a rejected edit.
pub fn parse_strokes(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return Some(0);
    }

    let value = digits
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')));

    if negative && value > 0 {
        None
    } else {
        Some(value)
    }
}
