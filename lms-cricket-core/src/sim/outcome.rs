//! Per-ball outcome probabilities derived from historical player stats.
//!
//! Everything here is a pure function of the inputs; the only randomness is
//! the final cumulative draw in [`sample_run`]. Missing stats fall back to
//! the neutral defaults below so a malformed roster can never fail mid-ball.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::Tuning;
use crate::data::Player;

/// Neutral fallbacks for absent statistics.
pub const DEFAULT_STRIKE_RATE: f64 = 95.0;
pub const DEFAULT_BATTING_AVERAGE: f64 = 18.0;
pub const DEFAULT_ECONOMY: f64 = 10.0;
/// Wickets per ball for a bowler with no history.
pub const DEFAULT_WICKET_RATE: f64 = 0.04;
pub const DEFAULT_FOUR_RATE: f64 = 0.03;
pub const DEFAULT_SIX_RATE: f64 = 0.01;
pub const DEFAULT_RUNS_PER_BALL: f64 = 0.8;

/// Sampled run values, aligned with the distribution arrays.
pub const RUN_VALUES: [u32; 6] = [0, 1, 2, 3, 4, 6];

/// Batter skill in 0..=1, from strike rate clamped to the tuning cap.
pub fn batting_skill(batter: &Player, tuning: &Tuning) -> f64 {
    let strike_rate = if batter.statless {
        DEFAULT_STRIKE_RATE
    } else {
        batter.batting.strike_rate.unwrap_or(DEFAULT_STRIKE_RATE)
    };
    strike_rate.clamp(0.0, tuning.max_strike_rate) / tuning.max_strike_rate
}

/// Bowler skill in 0..=1, from historical wickets per ball clamped to the
/// tuning cap. Extreme inputs (100000 wickets off one ball) clamp to 1.
pub fn bowling_skill(bowler: &Player, balls_per_over: u32, tuning: &Tuning) -> f64 {
    let rate = if bowler.statless {
        DEFAULT_WICKET_RATE
    } else {
        let balls = bowler.bowling.overs_bowled * balls_per_over as f64;
        if balls > 0.0 {
            bowler.bowling.wickets as f64 / balls
        } else {
            DEFAULT_WICKET_RATE
        }
    };
    rate.clamp(0.0, tuning.max_wicket_rate) / tuning.max_wicket_rate
}

/// Per-ball wicket probability, always within the tuning clamp bounds.
pub fn wicket_probability(
    batter: &Player,
    bowler: &Player,
    balls_per_over: u32,
    tuning: &Tuning,
) -> f64 {
    let p = tuning.wicket_base
        + bowling_skill(bowler, balls_per_over, tuning) * tuning.wicket_bowl_weight
        - batting_skill(batter, tuning) * tuning.wicket_bat_weight;
    p.clamp(tuning.wicket_floor, tuning.wicket_ceiling)
}

/// Expected runs per ball for a batter, boosted by batting average.
pub fn runs_per_ball(batter: &Player) -> f64 {
    if batter.statless {
        return DEFAULT_RUNS_PER_BALL;
    }
    let base = match batter.batting.strike_rate {
        Some(sr) if sr > 0.0 => sr / 100.0,
        _ if batter.batting.balls_faced > 0.0 => batter.batting.runs / batter.batting.balls_faced,
        _ => DEFAULT_RUNS_PER_BALL,
    };
    let average = batter.batting.average.unwrap_or(DEFAULT_BATTING_AVERAGE);
    base * (1.0 + average.clamp(0.0, 100.0) / 300.0)
}

/// Expected runs conceded per ball by a bowler, before leakage and fatigue.
pub fn bowler_runs_per_ball(bowler: &Player, balls_per_over: u32) -> f64 {
    let economy = if bowler.statless {
        DEFAULT_ECONOMY
    } else {
        match bowler.bowling.economy {
            Some(e) if e > 0.0 => e,
            _ if bowler.bowling.overs_bowled > 0.0 => {
                bowler.bowling.runs_conceded / bowler.bowling.overs_bowled
            }
            _ => DEFAULT_ECONOMY,
        }
    };
    economy / balls_per_over as f64
}

/// Relative batting advantage in 0..1; 0.5 means an even contest.
pub fn batting_advantage(bat_rpb: f64, bowl_rpb: f64) -> f64 {
    bat_rpb / (bat_rpb + bowl_rpb + 1e-6)
}

fn boundary_rates(batter: &Player) -> (f64, f64) {
    if batter.statless || batter.batting.balls_faced <= 0.0 {
        (DEFAULT_FOUR_RATE, DEFAULT_SIX_RATE)
    } else {
        (
            batter.batting.fours as f64 / batter.batting.balls_faced,
            batter.batting.sixes as f64 / batter.batting.balls_faced,
        )
    }
}

/// Build the per-ball run distribution over [`RUN_VALUES`], normalized to
/// sum to 1. In last-man mode the odd-run mass is remapped onto 0 and 2
/// before sampling, so odd outcomes carry zero probability.
pub fn run_distribution(
    batter: &Player,
    advantage: f64,
    last_man: bool,
    tuning: &Tuning,
) -> [f64; 6] {
    let (four_rate, six_rate) = boundary_rates(batter);
    let p4 = (four_rate * tuning.four_scale).max(tuning.four_floor);
    let p6 = (six_rate * tuning.six_scale).max(tuning.six_floor);
    let remainder = (1.0 - (p4 + p6)).max(0.0);
    let mut dist = [
        remainder * tuning.base_split[0],
        remainder * tuning.base_split[1],
        remainder * tuning.base_split[2],
        remainder * tuning.base_split[3],
        p4,
        p6,
    ];
    if last_man {
        let odd_mass = dist[1] + dist[3];
        dist[0] += odd_mass * tuning.last_man_dot_share;
        dist[2] += odd_mass * (1.0 - tuning.last_man_dot_share);
        dist[1] = 0.0;
        dist[3] = 0.0;
    }
    if advantage > tuning.advantage_threshold {
        let boost = advantage - tuning.advantage_threshold;
        dist[4] += boost * tuning.advantage_four_boost;
        dist[5] += boost * tuning.advantage_six_boost;
    }
    let sum: f64 = dist.iter().sum();
    if sum > 0.0 {
        for p in &mut dist {
            *p /= sum;
        }
    }
    dist
}

/// Cumulative draw over a normalized distribution. Falls through to a dot
/// ball if float drift leaves the draw above the last step.
pub fn sample_run(dist: &[f64; 6], last_man: bool, rng: &mut SmallRng) -> u32 {
    let pick: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (i, p) in dist.iter().enumerate() {
        if *p <= 0.0 {
            continue;
        }
        cumulative += p;
        if pick <= cumulative {
            let run = RUN_VALUES[i];
            // last-man odd outcomes are already mass-zero; keep the guard
            if last_man && run % 2 == 1 {
                return 0;
            }
            return run;
        }
    }
    0
}
