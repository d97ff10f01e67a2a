//! Derived per-player values, recomputed from the score table on every read

use super::score::ScoreTable;

/// Sum of a player's strokes over holes `1..=num_holes`. Unentered holes count as 0.
pub fn total_for(scores: &ScoreTable, player_id: u32, num_holes: u32) -> u32 {
    (1..=num_holes)
        .filter_map(|hole| scores.get(player_id, hole))
        .fold(0u32, u32::saturating_add)
}

/// Last hole with a recorded, non-zero score, or 0 if there is none.
///
/// A stored 0 does not count as played. Zero and "not entered" are
/// deliberately indistinguishable here.
pub fn through_for(scores: &ScoreTable, player_id: u32, num_holes: u32) -> u32 {
    (1..=num_holes)
        .rev()
        .find(|&hole| scores.get(player_id, hole).is_some_and(|s| s != 0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_empty() {
        let scores = ScoreTable::new();
        assert_eq!(total_for(&scores, 1, 18), 0);
    }

    #[test]
    fn test_total_sums_entered_holes() {
        let mut scores = ScoreTable::new();
        scores.set(1, 1, 4);
        scores.set(1, 2, 5);
        scores.set(1, 9, 3);
        scores.set(2, 1, 7);
        assert_eq!(total_for(&scores, 1, 9), 12);
        assert_eq!(total_for(&scores, 2, 9), 7);
    }

    #[test]
    fn test_total_ignores_holes_past_round_length() {
        let mut scores = ScoreTable::new();
        scores.set(1, 9, 4);
        scores.set(1, 10, 4);
        assert_eq!(total_for(&scores, 1, 9), 4);
    }

    #[test]
    fn test_through_is_last_nonzero_hole() {
        let mut scores = ScoreTable::new();
        scores.set(1, 1, 4);
        scores.set(1, 5, 6);
        assert_eq!(through_for(&scores, 1, 18), 5);
    }

    #[test]
    fn test_through_skips_gaps() {
        let mut scores = ScoreTable::new();
        scores.set(1, 7, 4);
        assert_eq!(through_for(&scores, 1, 18), 7);
    }

    #[test]
    fn test_through_ignores_zero_entries() {
        let mut scores = ScoreTable::new();
        scores.set(1, 2, 3);
        scores.set(1, 4, 0);
        assert_eq!(through_for(&scores, 1, 18), 2);

        let mut only_zero = ScoreTable::new();
        only_zero.set(1, 1, 0);
        assert_eq!(through_for(&only_zero, 1, 18), 0);
    }

    #[test]
    fn test_through_none_entered() {
        let scores = ScoreTable::new();
        assert_eq!(through_for(&scores, 3, 9), 0);
    }
}
