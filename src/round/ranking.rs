//! Leaderboard ordering

use std::cmp::Ordering;

/// A player annotated with derived totals, ready to rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player_id: u32,
    pub name: String,
    pub total: u32,
    pub through: u32,
}

impl Standing {
    pub fn has_started(&self) -> bool {
        self.through > 0
    }
}

/// Order standings for display.
///
/// Players who have started come first, lowest total leading. Players with
/// nothing played go last regardless of total. Equal keys keep input order.
pub fn rank(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(compare);
    standings
}

fn compare(a: &Standing, b: &Standing) -> Ordering {
    match (a.has_started(), b.has_started()) {
        (true, true) => a.total.cmp(&b.total),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Whether the row at `index` gets first-place styling.
pub fn is_leader(index: usize, standing: &Standing) -> bool {
    index == 0 && standing.has_started()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(id: u32, total: u32, through: u32) -> Standing {
        Standing {
            player_id: id,
            name: format!("Player {}", id),
            total,
            through,
        }
    }

    fn ids(ranked: &[Standing]) -> Vec<u32> {
        ranked.iter().map(|s| s.player_id).collect()
    }

    #[test]
    fn test_lowest_total_leads_and_unstarted_last() {
        // A=72 thru 18, B not started, C=68 thru 18
        let ranked = rank(vec![standing(1, 72, 18), standing(2, 0, 0), standing(3, 68, 18)]);
        assert_eq!(ids(&ranked), vec![3, 1, 2]);
    }

    #[test]
    fn test_unstarted_sorts_after_even_with_lower_total() {
        let ranked = rank(vec![standing(1, 0, 0), standing(2, 40, 9)]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![standing(1, 36, 9), standing(2, 36, 9), standing(3, 30, 8)]);
        assert_eq!(ids(&ranked), vec![3, 1, 2]);

        let ranked = rank(vec![standing(2, 36, 9), standing(1, 36, 9)]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_all_unstarted_keep_input_order() {
        let ranked = rank(vec![standing(1, 0, 0), standing(2, 0, 0), standing(3, 0, 0)]);
        assert_eq!(ids(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn test_total_wins_over_progress() {
        // Fewer holes played but lower total still ranks ahead
        let ranked = rank(vec![standing(1, 40, 9), standing(2, 12, 3)]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_leader_requires_started() {
        let started = standing(1, 4, 1);
        let idle = standing(2, 0, 0);
        assert!(is_leader(0, &started));
        assert!(!is_leader(1, &started));
        assert!(!is_leader(0, &idle));
    }
}
