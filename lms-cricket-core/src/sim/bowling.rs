//! Bowler rotation selection.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::data::Player;

/// Most bowlers used in an innings; over `i` goes to `list[i % len]`.
pub const MAX_BOWLERS: usize = 8;

/// Pick up to [`MAX_BOWLERS`] bowlers from the fielding roster, excluding the
/// keeper. Players with bowling history come first; the remainder is padded
/// with non-bowlers when the roster is short on them. Selection order is
/// randomized but deterministic under the shared seeded stream. A roster that
/// cannot supply eight simply yields fewer and the innings cycles the shorter
/// list.
pub fn select_bowlers(
    fielding: &[Player],
    keeper_id: Option<&str>,
    rng: &mut SmallRng,
) -> Vec<Player> {
    let eligible: Vec<&Player> = fielding
        .iter()
        .filter(|p| keeper_id != Some(p.id.as_str()))
        .collect();
    let mut with_history: Vec<&Player> = eligible
        .iter()
        .copied()
        .filter(|p| p.bowling.overs_bowled > 0.0)
        .collect();
    let mut without: Vec<&Player> = eligible
        .iter()
        .copied()
        .filter(|p| p.bowling.overs_bowled <= 0.0)
        .collect();
    with_history.shuffle(rng);
    without.shuffle(rng);
    with_history
        .into_iter()
        .chain(without)
        .take(MAX_BOWLERS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BattingRecord, BowlingRecord, Player};
    use rand::SeedableRng;

    fn bowler(id: &str, overs: f64) -> Player {
        Player::from_records(
            id,
            id,
            BattingRecord::default(),
            BowlingRecord {
                overs_bowled: overs,
                ..BowlingRecord::default()
            },
        )
    }

    fn roster() -> Vec<Player> {
        (0..10)
            .map(|i| bowler(&format!("P{i}"), if i < 4 { 20.0 } else { 0.0 }))
            .collect()
    }

    #[test]
    fn players_with_history_come_first() {
        let roster = roster();
        let mut rng = SmallRng::seed_from_u64(11);
        let picked = select_bowlers(&roster, None, &mut rng);
        assert_eq!(picked.len(), MAX_BOWLERS);
        let front: Vec<&str> = picked[..4].iter().map(|p| p.id.as_str()).collect();
        for id in ["P0", "P1", "P2", "P3"] {
            assert!(front.contains(&id), "{id} has history and should lead");
        }
    }

    #[test]
    fn keeper_never_bowls() {
        let roster = roster();
        let mut rng = SmallRng::seed_from_u64(11);
        let picked = select_bowlers(&roster, Some("P2"), &mut rng);
        assert!(picked.iter().all(|p| p.id != "P2"));
    }

    #[test]
    fn selection_caps_at_eight() {
        let roster: Vec<Player> = (0..12).map(|i| bowler(&format!("B{i}"), 10.0)).collect();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(select_bowlers(&roster, None, &mut rng).len(), MAX_BOWLERS);
    }

    #[test]
    fn short_rosters_return_what_they_have() {
        let roster: Vec<Player> = (0..3).map(|i| bowler(&format!("B{i}"), 0.0)).collect();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(select_bowlers(&roster, None, &mut rng).len(), 3);
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(select_bowlers(&roster, Some("B0"), &mut rng).len(), 2);
    }

    #[test]
    fn selection_is_deterministic_under_a_seed() {
        let roster = roster();
        let mut rng_a = SmallRng::seed_from_u64(99);
        let mut rng_b = SmallRng::seed_from_u64(99);
        let picked_a = select_bowlers(&roster, Some("P9"), &mut rng_a);
        let picked_b = select_bowlers(&roster, Some("P9"), &mut rng_b);
        let ids_a: Vec<&str> = picked_a.iter().map(|p| p.id.as_str()).collect();
        let ids_b: Vec<&str> = picked_b.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
