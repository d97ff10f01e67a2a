//! Single-slot undo for score edits

use super::score::ScoreTable;

/// The prior value of the most recent score edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    pub player_id: u32,
    pub hole: u32,
    /// `None` when the cell had no entry before the edit.
    pub previous: Option<u32>,
}

/// Holds at most one [`UndoRecord`]; each new edit replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoBuffer {
    slot: Option<UndoRecord>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: UndoRecord) {
        self.slot = Some(record);
    }

    pub fn peek(&self) -> Option<&UndoRecord> {
        self.slot.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.slot.is_some()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Roll the recorded cell back and empty the buffer.
    ///
    /// An absent previous value deletes the entry instead of writing 0.
    /// Returns the record that was applied, or `None` if there was nothing to undo.
    pub fn apply(&mut self, scores: &mut ScoreTable) -> Option<UndoRecord> {
        let record = self.slot.take()?;
        match record.previous {
            Some(value) => {
                scores.set(record.player_id, record.hole, value);
            }
            None => {
                scores.remove(record.player_id, record.hole);
            }
        }
        Some(record)
    }
}
