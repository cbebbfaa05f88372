//! Dismissal kinds, attribution and scorecard text.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::data::Player;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DismissalKind {
    Bowled,
    Caught,
    CaughtAndBowled,
    RunOut,
    Stumped,
    Lbw,
}

/// Order matches `Tuning::dismissal_weights`.
pub const DISMISSAL_KINDS: [DismissalKind; 6] = [
    DismissalKind::Bowled,
    DismissalKind::Caught,
    DismissalKind::CaughtAndBowled,
    DismissalKind::RunOut,
    DismissalKind::Stumped,
    DismissalKind::Lbw,
];

impl DismissalKind {
    /// Run-outs are the one mode that never goes on the bowler's figures.
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, DismissalKind::RunOut)
    }
}

/// Weighted draw over the six dismissal modes.
pub fn pick_dismissal(weights: &[f64; 6], rng: &mut SmallRng) -> DismissalKind {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return DismissalKind::Bowled;
    }
    let mut pick = rng.gen::<f64>() * total;
    for (kind, weight) in DISMISSAL_KINDS.iter().zip(weights) {
        if pick < *weight {
            return *kind;
        }
        pick -= weight;
    }
    DismissalKind::Bowled
}

/// Random fielder from the bowling side, optionally excluding the bowler
/// (a catch credited "c&b" is its own mode).
pub fn pick_fielder<'a>(
    fielders: &'a [Player],
    exclude_id: Option<&str>,
    rng: &mut SmallRng,
) -> Option<&'a Player> {
    let pool: Vec<&Player> = fielders
        .iter()
        .filter(|p| exclude_id != Some(p.id.as_str()))
        .collect();
    pool.choose(rng).copied()
}

/// Scorebook dismissal text: "b Smith", "c Jones b Smith", "c&b Smith",
/// "st † Keeper", "lbw b Smith", "run out (Jones)".
pub fn howout_text(
    kind: DismissalKind,
    bowler: &str,
    fielder: Option<&str>,
    keeper: Option<&str>,
) -> String {
    match kind {
        DismissalKind::Bowled => format!("b {bowler}"),
        DismissalKind::Caught => format!("c {} b {bowler}", fielder.unwrap_or("sub")),
        DismissalKind::CaughtAndBowled => format!("c&b {bowler}"),
        DismissalKind::RunOut => format!("run out ({})", fielder.unwrap_or("sub")),
        DismissalKind::Stumped => format!("st \u{2020} {}", keeper.unwrap_or("Unknown")),
        DismissalKind::Lbw => format!("lbw b {bowler}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn weighted_pick_respects_zeroed_modes() {
        // all mass on Caught
        let weights = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(pick_dismissal(&weights, &mut rng), DismissalKind::Caught);
        }
    }

    #[test]
    fn howout_texts_match_the_scorebook() {
        assert_eq!(
            howout_text(DismissalKind::Bowled, "Smith", None, None),
            "b Smith"
        );
        assert_eq!(
            howout_text(DismissalKind::Caught, "Smith", Some("Jones"), None),
            "c Jones b Smith"
        );
        assert_eq!(
            howout_text(DismissalKind::CaughtAndBowled, "Smith", None, None),
            "c&b Smith"
        );
        assert_eq!(
            howout_text(DismissalKind::Stumped, "Smith", None, Some("Keeper")),
            "st \u{2020} Keeper"
        );
        assert_eq!(
            howout_text(DismissalKind::Stumped, "Smith", None, None),
            "st \u{2020} Unknown"
        );
        assert_eq!(
            howout_text(DismissalKind::Lbw, "Smith", None, None),
            "lbw b Smith"
        );
        assert_eq!(
            howout_text(DismissalKind::RunOut, "Smith", Some("Jones"), None),
            "run out (Jones)"
        );
    }

    #[test]
    fn only_run_outs_skip_the_bowler() {
        for kind in DISMISSAL_KINDS {
            assert_eq!(kind.credits_bowler(), kind != DismissalKind::RunOut);
        }
    }

    #[test]
    fn caught_excludes_the_bowler_from_the_fielder_pool() {
        let fielders: Vec<crate::data::Player> = (0..3)
            .map(|i| crate::data::Player::unknown(format!("F{i}"), format!("F{i}")))
            .collect();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let picked = pick_fielder(&fielders, Some("F1"), &mut rng).expect("pool not empty");
            assert_ne!(picked.id, "F1");
        }
    }
}
