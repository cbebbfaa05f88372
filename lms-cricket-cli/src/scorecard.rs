//! Plain-text scorecard rendering for a finished match.

use anyhow::{anyhow, Result};

use lms_cricket_core::config::MatchConfig;
use lms_cricket_core::engine::MatchReport;
use lms_cricket_core::over_log::OverLog;
use lms_cricket_core::sim::{BatterCard, InningsResult};

/// How much of the narrative log to print alongside the cards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputMode {
    /// Cards only.
    #[default]
    Scorecard,
    /// Cards plus the over-by-over summary lines.
    Overs,
    /// Cards plus every delivery.
    Balls,
}

impl OutputMode {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "scorecard" => Ok(Self::Scorecard),
            "overs" => Ok(Self::Overs),
            "balls" => Ok(Self::Balls),
            other => Err(anyhow!(
                "--output must be scorecard, overs or balls, got '{}'",
                other
            )),
        }
    }
}

pub fn print_match(report: &MatchReport, config: &MatchConfig, mode: OutputMode) {
    println!("==================================================");
    println!("  {} vs {}", report.first_batting, report.second_batting);
    println!("  {} match, seed {}", config.match_type.name(), report.seed);
    println!("==================================================");

    print_innings(
        &report.first_batting,
        &report.first_innings,
        &report.first_log,
        config,
        mode,
    );
    println!();
    println!("Target: {}", report.target);
    print_innings(
        &report.second_batting,
        &report.second_innings,
        &report.second_log,
        config,
        mode,
    );

    println!();
    println!("Result: {}", report.result_text);
}

fn print_innings(
    team: &str,
    innings: &InningsResult,
    log: &OverLog,
    config: &MatchConfig,
    mode: OutputMode,
) {
    println!();
    println!(
        "{team} innings: {} / {} ({} overs)",
        innings.runs,
        innings.wickets,
        config.overs_from_balls(innings.balls)
    );

    println!();
    println!(" Batting");
    for batter in &innings.batsmen {
        println!(
            "   {:<22} {:<26} {}",
            batter.name,
            batter_status(batter),
            batter_score(batter)
        );
    }
    let extras = &innings.extras;
    println!(
        "   {:<22} {:<26} {} (w {}, nb {})",
        "Extras",
        "",
        extras.total(),
        extras.wides,
        extras.no_balls
    );

    println!();
    println!(" Bowling");
    for bowler in &innings.bowlers {
        if bowler.balls == 0 {
            continue;
        }
        println!(
            "   {:<22} {}",
            bowler.name,
            bowler.figures(config.balls_per_over)
        );
    }

    let fow: Vec<_> = log.over_summaries().iter().flat_map(|s| &s.fow).collect();
    if !fow.is_empty() {
        println!();
        println!(" Fall of wickets");
        for w in fow {
            println!(
                "   {:>5}  {} {} ({})  {}",
                w.label, w.batter, w.runs, w.balls, w.howout
            );
        }
    }

    match mode {
        OutputMode::Scorecard => {}
        OutputMode::Overs => {
            println!();
            println!(" Overs");
            for summary in log.over_summaries() {
                let tag = if summary.label.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", summary.label)
                };
                println!(
                    "   Over {:>2}: {} (+{}/{})  {}{}",
                    summary.over,
                    summary.score,
                    summary.over_runs,
                    summary.over_wickets,
                    summary.bowler_line,
                    tag
                );
            }
        }
        OutputMode::Balls => {
            println!();
            println!(" Ball by ball");
            for event in log.ball_events() {
                println!(
                    "   {:>5} - {} - to - {} - {}",
                    event.ball, event.bowler, event.batter, event.outcome
                );
            }
        }
    }
}

/// Score column: `34 (25)` when out, `34* (25)` when not out, `DNB` for a
/// batter who never faced.
fn batter_score(batter: &BatterCard) -> String {
    if batter.is_not_out() && batter.balls == 0 && batter.runs == 0 {
        "DNB".to_string()
    } else if batter.is_not_out() {
        format!("{}* ({})", batter.runs, batter.balls)
    } else {
        format!("{} ({})", batter.runs, batter.balls)
    }
}

fn batter_status(batter: &BatterCard) -> String {
    if batter.dismissed {
        batter.howout.clone()
    } else if batter.balls == 0 && batter.runs == 0 {
        String::new()
    } else if batter.has_retired && batter.retired {
        "retired not out".to_string()
    } else {
        "not out".to_string()
    }
}
