//! The ball-by-ball innings state machine.
//!
//! One call simulates one full innings end to end: strike rotation, bowler
//! cycling, penalty balls and free hits, wickets, LMS retirement and the
//! last-man rule. All randomness comes from the single `SmallRng` stream
//! passed in, so a fixed seed reproduces the innings bit for bit.

use std::collections::VecDeque;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::{MatchConfig, Tuning};
use crate::data::Player;
use crate::over_log::{FallOfWicket, OverLog, OverSummary};
use crate::sim::bowling::select_bowlers;
use crate::sim::dismissal::{howout_text, pick_dismissal, pick_fielder, DismissalKind};
use crate::sim::outcome;
use crate::sim::scorecard::{BatterCard, BowlerCard, Extras, InningsResult};

/// Simulate one innings.
///
/// `batting` is the batting order; `bowling` is the fielding roster from
/// which bowlers are rotated. `target` ends the innings as soon as it is
/// reached (second innings only). `log`, when supplied, receives one record
/// per delivery plus per-over summaries; it has no effect on outcomes.
#[allow(clippy::too_many_arguments)]
pub fn simulate_innings(
    batting: &[Player],
    bowling: &[Player],
    config: &MatchConfig,
    tuning: &Tuning,
    target: Option<u32>,
    keeper_id: Option<&str>,
    log: Option<&mut OverLog>,
    rng: &mut SmallRng,
) -> InningsResult {
    let innings = Innings::new(batting, bowling, config, tuning, target, keeper_id, rng);
    innings.run(log, rng)
}

struct Innings<'a> {
    batting: &'a [Player],
    bowling: &'a [Player],
    config: &'a MatchConfig,
    tuning: &'a Tuning,
    target: Option<u32>,
    keeper_name: Option<String>,

    batters: Vec<BatterCard>,
    bowlers: Vec<Player>,
    cards: Vec<BowlerCard>,

    striker: Option<usize>,
    non_striker: Option<usize>,
    queue: VecDeque<usize>,

    runs: u32,
    wickets: u32,
    legal_balls: u32,
    extras: Extras,
    free_hit: bool,

    // per-over state, reset by begin_over
    over_runs: u32,
    over_wickets: u32,
    over_fow: Vec<FallOfWicket>,
    penalties_in_over: u32,
    over_start_runs: u32,
    over_start_balls: u32,
    econ_adjust: f64,
}

impl<'a> Innings<'a> {
    fn new(
        batting: &'a [Player],
        bowling: &'a [Player],
        config: &'a MatchConfig,
        tuning: &'a Tuning,
        target: Option<u32>,
        keeper_id: Option<&str>,
        rng: &mut SmallRng,
    ) -> Self {
        let mut bowlers = select_bowlers(bowling, keeper_id, rng);
        if bowlers.is_empty() {
            // roster was nothing but the keeper; someone still has to bowl
            bowlers = bowling.to_vec();
        }
        let cards = bowlers.iter().map(BowlerCard::new).collect();
        let batters = batting.iter().map(BatterCard::new).collect();
        let keeper_name = keeper_id
            .and_then(|id| bowling.iter().find(|p| p.id == id))
            .map(|p| p.name.clone());
        Self {
            batting,
            bowling,
            config,
            tuning,
            target,
            keeper_name,
            batters,
            bowlers,
            cards,
            striker: (!batting.is_empty()).then_some(0),
            non_striker: (batting.len() > 1).then_some(1),
            queue: (2..batting.len()).collect(),
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            extras: Extras::default(),
            free_hit: false,
            over_runs: 0,
            over_wickets: 0,
            over_fow: Vec::new(),
            penalties_in_over: 0,
            over_start_runs: 0,
            over_start_balls: 0,
            econ_adjust: 1.0,
        }
    }

    fn run(mut self, mut log: Option<&mut OverLog>, rng: &mut SmallRng) -> InningsResult {
        if self.batters.is_empty() || self.bowlers.is_empty() {
            return self.into_result();
        }
        let balls_per_over = self.config.balls_per_over;
        let mut over_open = false;
        let mut current_over = 0u32;
        let mut bowler_idx = 0usize;

        loop {
            if self.alive_count() == 0 {
                if over_open {
                    self.emit_over_summary(current_over, bowler_idx, "end", log.as_deref_mut());
                }
                break;
            }
            if let Some(limit) = self.config.balls_per_innings {
                if self.legal_balls >= limit {
                    if over_open && self.legal_balls % balls_per_over != 0 {
                        self.emit_over_summary(
                            current_over,
                            bowler_idx,
                            "partial",
                            log.as_deref_mut(),
                        );
                    }
                    break;
                }
            }

            let over = self.legal_balls / balls_per_over;
            if !over_open {
                current_over = over;
                bowler_idx = (over as usize) % self.bowlers.len();
                self.begin_over(bowler_idx, rng);
                over_open = true;
            }

            let last_man = self.enforce_last_man();
            let Some(striker_idx) = self.striker else {
                break;
            };
            let bowler_name = self.bowlers[bowler_idx].name.clone();
            let bowler_id = self.bowlers[bowler_idx].id.clone();
            let ball_label = format!("{}.{}", over, self.legal_balls % balls_per_over + 1);

            // Penalty ball: extras only, no legal delivery, no dismissal.
            if rng.gen::<f64>() < self.tuning.penalty_ball_prob {
                let in_final_over = self.config.final_over() == Some(over);
                let award = if in_final_over || self.penalties_in_over == 0 {
                    1
                } else {
                    3
                };
                self.penalties_in_over += 1;
                let is_wide = rng.gen::<f64>() < self.tuning.wide_share;
                if is_wide {
                    self.extras.wides += award;
                } else {
                    self.extras.no_balls += award;
                    self.free_hit = true;
                }
                self.runs += award;
                self.over_runs += award;
                self.cards[bowler_idx].runs += award;
                if let Some(log) = log.as_deref_mut() {
                    let plural = if award == 1 { "" } else { "s" };
                    let text = if is_wide {
                        format!("wide, {award} extra{plural}")
                    } else {
                        format!("no ball, {award} extra{plural} (free hit next)")
                    };
                    log.push_ball(
                        &ball_label,
                        &bowler_name,
                        &self.batters[striker_idx].name,
                        text,
                    );
                }
                if self.target_reached() {
                    self.emit_over_summary(current_over, bowler_idx, "partial", log.as_deref_mut());
                    break;
                }
                continue;
            }

            // Legal delivery.
            let free_hit_ball = std::mem::take(&mut self.free_hit);
            let wicket = !free_hit_ball
                && rng.gen::<f64>()
                    < outcome::wicket_probability(
                        &self.batting[striker_idx],
                        &self.bowlers[bowler_idx],
                        balls_per_over,
                        self.tuning,
                    );

            self.legal_balls += 1;
            self.cards[bowler_idx].balls += 1;
            self.batters[striker_idx].balls += 1;

            if wicket {
                self.wickets += 1;
                self.over_wickets += 1;
                let kind = pick_dismissal(&self.tuning.dismissal_weights, rng);
                let mut out_idx = striker_idx;
                if kind == DismissalKind::RunOut && !last_man {
                    if let Some(ns) = self.non_striker {
                        if rng.gen::<f64>() < self.tuning.run_out_non_striker {
                            out_idx = ns;
                        }
                    }
                }
                let fielder = match kind {
                    DismissalKind::Caught => {
                        pick_fielder(self.bowling, Some(&bowler_id), rng).map(|p| p.name.clone())
                    }
                    DismissalKind::RunOut => {
                        pick_fielder(self.bowling, None, rng).map(|p| p.name.clone())
                    }
                    _ => None,
                };
                let howout = howout_text(
                    kind,
                    &bowler_name,
                    fielder.as_deref(),
                    self.keeper_name.as_deref(),
                );
                {
                    let card = &mut self.batters[out_idx];
                    card.dismissed = true;
                    card.howout = howout.clone();
                    card.retired = false;
                }
                if kind.credits_bowler() {
                    self.cards[bowler_idx].wickets += 1;
                }
                let (out_name, out_runs, out_balls) = {
                    let card = &self.batters[out_idx];
                    (card.name.clone(), card.runs, card.balls)
                };
                self.over_fow.push(FallOfWicket {
                    label: ball_label.clone(),
                    batter: out_name.clone(),
                    runs: out_runs,
                    balls: out_balls,
                    howout: howout.clone(),
                });
                if let Some(log) = log.as_deref_mut() {
                    log.push_ball(&ball_label, &bowler_name, &out_name, format!("WICKET! {howout}"));
                }

                if let Some(next) = self.queue.pop_front() {
                    self.batters[next].retired = false;
                    if out_idx == striker_idx {
                        self.striker = Some(next);
                    } else {
                        self.non_striker = Some(next);
                    }
                } else if out_idx == striker_idx {
                    self.striker = None;
                } else {
                    self.non_striker = None;
                }
                if self.alive_count() == 0 {
                    self.emit_over_summary(current_over, bowler_idx, "end", log.as_deref_mut());
                    break;
                }
            } else {
                let bat_rpb = outcome::runs_per_ball(&self.batting[striker_idx]);
                let bowl_rpb =
                    outcome::bowler_runs_per_ball(&self.bowlers[bowler_idx], balls_per_over)
                        * self.econ_adjust;
                let advantage = outcome::batting_advantage(bat_rpb, bowl_rpb);
                let dist = outcome::run_distribution(
                    &self.batting[striker_idx],
                    advantage,
                    last_man,
                    self.tuning,
                );
                let run = outcome::sample_run(&dist, last_man, rng);
                self.runs += run;
                self.over_runs += run;
                self.batters[striker_idx].runs += run;
                self.cards[bowler_idx].runs += run;
                if let Some(log) = log.as_deref_mut() {
                    let mut text = match run {
                        0 => "no run".to_string(),
                        1 => "1 run".to_string(),
                        4 => "FOUR".to_string(),
                        6 => "SIX".to_string(),
                        n => format!("{n} runs"),
                    };
                    if free_hit_ball {
                        text.push_str(" (free hit)");
                    }
                    log.push_ball(&ball_label, &bowler_name, &self.batters[striker_idx].name, text);
                }
                if !last_man && run % 2 == 1 {
                    std::mem::swap(&mut self.striker, &mut self.non_striker);
                }
                self.check_retirement(&ball_label, &bowler_name, &mut log);
            }

            if self.target_reached() {
                self.emit_over_summary(current_over, bowler_idx, "partial", log.as_deref_mut());
                break;
            }

            if self.legal_balls % balls_per_over == 0 {
                let balls_this_over = self.cards[bowler_idx].balls - self.over_start_balls;
                let conceded = self.cards[bowler_idx].runs - self.over_start_runs;
                if balls_this_over == balls_per_over && conceded == 0 {
                    self.cards[bowler_idx].maidens += 1;
                }
                self.emit_over_summary(current_over, bowler_idx, "", log.as_deref_mut());
                if self.non_striker.is_some() && self.alive_count() > 1 {
                    std::mem::swap(&mut self.striker, &mut self.non_striker);
                }
                over_open = false;
            }
        }

        debug!(
            "innings complete: {}/{} in {} legal balls",
            self.runs, self.wickets, self.legal_balls
        );
        self.into_result()
    }

    fn alive_count(&self) -> usize {
        self.batters.iter().filter(|b| !b.dismissed).count()
    }

    /// If exactly one batter is left undismissed, force them onto strike with
    /// no non-striker, pulling them back from the queue if they had retired.
    fn enforce_last_man(&mut self) -> bool {
        if self.alive_count() != 1 {
            return false;
        }
        let Some(survivor) = self.batters.iter().position(|b| !b.dismissed) else {
            return false;
        };
        self.striker = Some(survivor);
        self.non_striker = None;
        self.queue.retain(|&idx| idx != survivor);
        self.batters[survivor].retired = false;
        true
    }

    /// LMS retirement: the striker leaves at the threshold if a replacement
    /// is waiting, joins the back of the queue and may return later. The
    /// `has_retired` latch guarantees this fires at most once per batter.
    fn check_retirement(
        &mut self,
        label: &str,
        bowler_name: &str,
        log: &mut Option<&mut OverLog>,
    ) {
        let Some(threshold) = self.config.retirement_threshold else {
            return;
        };
        let Some(striker_idx) = self.striker else {
            return;
        };
        if self.queue.is_empty() {
            return;
        }
        {
            let card = &self.batters[striker_idx];
            if card.dismissed || card.has_retired || card.runs < threshold {
                return;
            }
        }
        let Some(next) = self.queue.pop_front() else {
            return;
        };
        let (retiree_name, retiree_runs) = {
            let card = &mut self.batters[striker_idx];
            card.retired = true;
            card.has_retired = true;
            (card.name.clone(), card.runs)
        };
        self.queue.push_back(striker_idx);
        self.batters[next].retired = false;
        self.striker = Some(next);
        if let Some(log) = log.as_deref_mut() {
            log.push_ball(
                label,
                bowler_name,
                &retiree_name,
                format!("retired on {retiree_runs}, may return"),
            );
        }
    }

    fn target_reached(&self) -> bool {
        self.target.map_or(false, |t| self.runs >= t)
    }

    fn batter_line(&self, idx: usize) -> String {
        let card = &self.batters[idx];
        format!("{} {}* ({})", card.name, card.runs, card.balls)
    }

    fn begin_over(&mut self, bowler_idx: usize, rng: &mut SmallRng) {
        self.over_runs = 0;
        self.over_wickets = 0;
        self.over_fow.clear();
        self.penalties_in_over = 0;
        self.over_start_runs = self.cards[bowler_idx].runs;
        self.over_start_balls = self.cards[bowler_idx].balls;
        // economy leakage is one draw per over; fatigue grows with the
        // bowler's completed overs this innings
        let leak = 1.0 + self.tuning.economy_leakage * (rng.gen::<f64>() * 2.0 - 1.0);
        let overs_done = self.cards[bowler_idx].balls / self.config.balls_per_over;
        let fatigue = 1.0 + self.tuning.fatigue_per_over * f64::from(overs_done);
        self.econ_adjust = leak * fatigue;
    }

    fn emit_over_summary(
        &mut self,
        over: u32,
        bowler_idx: usize,
        label: &str,
        log: Option<&mut OverLog>,
    ) {
        let Some(log) = log else {
            return;
        };
        let card = &self.cards[bowler_idx];
        let bowler_line = format!("{} {}", card.name, card.figures(self.config.balls_per_over));
        let mut batters = Vec::new();
        if let Some(idx) = self.striker {
            batters.push(self.batter_line(idx));
        }
        if let Some(idx) = self.non_striker {
            batters.push(self.batter_line(idx));
        }
        log.push_over(OverSummary {
            over: over + 1,
            label: label.to_string(),
            score: format!("{}/{}", self.runs, self.wickets),
            over_runs: self.over_runs,
            over_wickets: self.over_wickets,
            bowler_line,
            batters,
            fow: self.over_fow.clone(),
        });
    }

    fn into_result(self) -> InningsResult {
        InningsResult {
            runs: self.runs,
            wickets: self.wickets,
            balls: self.legal_balls,
            batsmen: self.batters,
            bowlers: self.cards,
            extras: self.extras,
        }
    }
}
