use std::collections::HashMap;
use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;

use lms_cricket_core::prelude::{
    MatchConfig, MatchEngine, MatchReport, MatchResult, PlayerBook, TeamSheet,
};

mod sample;
mod scorecard;

use scorecard::OutputMode;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("run") => run_match(args),
        Some("demo") => run_demo(args),
        Some("batch") => run_batch(args),
        Some("list-players") => {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("Usage: lms-cricket-cli list-players <squad.json>"))?;
            list_players(&path)
        }
        Some("check-player") => {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("Usage: lms-cricket-cli check-player <squad.json> <id>"))?;
            let id = args
                .next()
                .ok_or_else(|| anyhow!("Usage: lms-cricket-cli check-player <squad.json> <id>"))?;
            check_player(&path, &id)
        }
        Some(cmd) => Err(anyhow!("Unknown command '{}'", cmd)),
        None => run_demo(std::iter::empty()),
    }
}

fn run_match(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut squad: Option<String> = None;
    let mut team_a: Option<String> = None;
    let mut team_b: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut format = "LMS".to_string();
    let mut bat_first: Option<bool> = None;
    let mut export: Option<String> = None;
    let mut mode = OutputMode::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--squad" => squad = args.next(),
            "--team-a" => team_a = args.next(),
            "--team-b" => team_b = args.next(),
            "--seed" => seed = Some(parse_seed(args.next())?),
            "--format" => {
                format = args.next().ok_or_else(|| anyhow!("--format needs a value"))?
            }
            "--bat-first" => bat_first = parse_bat_first(args.next())?,
            "--export-json" => export = args.next(),
            "--output" => {
                let name = args.next().ok_or_else(|| anyhow!("--output needs a value"))?;
                mode = OutputMode::from_name(&name)?;
            }
            other => return Err(anyhow!("Unknown arg '{}' for run", other)),
        }
    }
    let squad = squad.ok_or_else(|| anyhow!("run needs --squad <squad.json>"))?;
    let team_a = team_a.ok_or_else(|| anyhow!("run needs --team-a <team.json>"))?;
    let team_b = team_b.ok_or_else(|| anyhow!("run needs --team-b <team.json>"))?;

    let book = PlayerBook::from_file(&squad)?;
    let team_a = TeamSheet::from_file(&team_a, &book)?;
    let team_b = TeamSheet::from_file(&team_b, &book)?;
    let config = MatchConfig::from_name(&format)?;
    let seed = seed.unwrap_or_else(rand::random);

    let engine = MatchEngine::new(config.clone());
    let report = engine.simulate(&team_a, &team_b, seed, bat_first);
    scorecard::print_match(&report, &config, mode);

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&path, json + "\n").with_context(|| format!("failed to write {path}"))?;
        println!("\nExported report to {path}");
    }
    Ok(())
}

fn run_demo(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut seed: Option<u64> = None;
    let mut mode = OutputMode::Overs;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = Some(parse_seed(args.next())?),
            "--output" => {
                let name = args.next().ok_or_else(|| anyhow!("--output needs a value"))?;
                mode = OutputMode::from_name(&name)?;
            }
            other => return Err(anyhow!("Unknown arg '{}' for demo", other)),
        }
    }
    let (harriers, wanderers) = sample::demo_teams()?;
    let config = MatchConfig::lms();
    let engine = MatchEngine::new(config.clone());
    let report = engine.simulate(&harriers, &wanderers, seed.unwrap_or(20240615), None);
    scorecard::print_match(&report, &config, mode);
    Ok(())
}

fn run_batch(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut squad: Option<String> = None;
    let mut team_a: Option<String> = None;
    let mut team_b: Option<String> = None;
    let mut sims = 100u64;
    let mut base_seed = 0u64;
    let mut format = "LMS".to_string();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--squad" => squad = args.next(),
            "--team-a" => team_a = args.next(),
            "--team-b" => team_b = args.next(),
            "--sims" => {
                sims = args
                    .next()
                    .ok_or_else(|| anyhow!("--sims needs a value"))?
                    .parse()
                    .context("--sims must be a positive integer")?
            }
            "--seed" => base_seed = parse_seed(args.next())?,
            "--format" => {
                format = args.next().ok_or_else(|| anyhow!("--format needs a value"))?
            }
            other => return Err(anyhow!("Unknown arg '{}' for batch", other)),
        }
    }
    let config = MatchConfig::from_name(&format)?;
    let (team_a, team_b) = match (squad, team_a, team_b) {
        (Some(squad), Some(a), Some(b)) => {
            let book = PlayerBook::from_file(&squad)?;
            (
                TeamSheet::from_file(&a, &book)?,
                TeamSheet::from_file(&b, &book)?,
            )
        }
        (None, None, None) => sample::demo_teams()?,
        _ => return Err(anyhow!("batch needs --squad, --team-a and --team-b together")),
    };

    let balls_per_over = config.balls_per_over;
    let engine = MatchEngine::new(config);
    // alternate who bats first so neither side gets a systematic edge
    let reports: Vec<_> = (0..sims)
        .into_par_iter()
        .map(|i| engine.simulate(&team_a, &team_b, base_seed + i, Some(i % 2 == 0)))
        .collect();

    print_batch_summary(&team_a, &team_b, base_seed, balls_per_over, &reports);
    Ok(())
}

#[derive(Default)]
struct PlayerTally {
    runs: u64,
    balls: u64,
    outs: u64,
    wickets: u64,
    conceded: u64,
    balls_bowled: u64,
}

fn print_batch_summary(
    team_a: &TeamSheet,
    team_b: &TeamSheet,
    base_seed: u64,
    balls_per_over: u32,
    reports: &[MatchReport],
) {
    let mut wins: HashMap<&str, u64> = HashMap::new();
    let mut ties = 0u64;
    let mut total_first = 0u64;
    let mut tallies: HashMap<String, PlayerTally> = HashMap::new();

    for report in reports {
        match &report.result {
            MatchResult::WonByRuns { team, .. } | MatchResult::WonByWickets { team, .. } => {
                *wins.entry(team.as_str()).or_insert(0) += 1;
            }
            MatchResult::Tied => ties += 1,
        }
        total_first += u64::from(report.first_innings.runs);
        for innings in [&report.first_innings, &report.second_innings] {
            for card in &innings.batsmen {
                let tally = tallies.entry(card.name.clone()).or_default();
                tally.runs += u64::from(card.runs);
                tally.balls += u64::from(card.balls);
                if card.dismissed {
                    tally.outs += 1;
                }
            }
            for card in &innings.bowlers {
                let tally = tallies.entry(card.name.clone()).or_default();
                tally.wickets += u64::from(card.wickets);
                tally.conceded += u64::from(card.runs);
                tally.balls_bowled += u64::from(card.balls);
            }
        }
    }

    let sims = reports.len() as u64;
    println!(
        "Simulated {} matches, seeds {}..{}",
        sims,
        base_seed,
        base_seed + sims
    );
    println!(
        "  {:<24} {}",
        team_a.name,
        wins.get(team_a.name.as_str()).copied().unwrap_or(0)
    );
    println!(
        "  {:<24} {}",
        team_b.name,
        wins.get(team_b.name.as_str()).copied().unwrap_or(0)
    );
    println!("  {:<24} {}", "Ties", ties);
    if sims > 0 {
        println!(
            "  Average 1st-innings score: {:.1}",
            total_first as f64 / sims as f64
        );
    }

    println!();
    println!(
        "  {:<22} {:>7} {:>7} {:>6} {:>8} {:>7} {:>6}",
        "Player", "runs", "balls", "avg", "wickets", "econ", "SR"
    );
    let mut names: Vec<_> = tallies.keys().cloned().collect();
    names.sort();
    for name in names {
        let Some(t) = tallies.get(&name) else { continue };
        let avg = if t.outs > 0 {
            format!("{:.1}", t.runs as f64 / t.outs as f64)
        } else {
            "-".to_string()
        };
        let econ = if t.balls_bowled > 0 {
            let overs = t.balls_bowled as f64 / f64::from(balls_per_over);
            format!("{:.2}", t.conceded as f64 / overs)
        } else {
            "-".to_string()
        };
        let strike_rate = if t.balls > 0 {
            format!("{:.0}", 100.0 * t.runs as f64 / t.balls as f64)
        } else {
            "-".to_string()
        };
        println!(
            "  {:<22} {:>7} {:>7} {:>6} {:>8} {:>7} {:>6}",
            name, t.runs, t.balls, avg, t.wickets, econ, strike_rate
        );
    }
}

fn list_players(path: &str) -> Result<()> {
    let book = PlayerBook::from_file(path)?;
    for player in book.players() {
        let note = if player.statless { "  [no stats]" } else { "" };
        println!("{:<10} {}{}", player.id, player.name, note);
    }
    println!("{} players", book.len());
    Ok(())
}

fn check_player(path: &str, id: &str) -> Result<()> {
    let book = PlayerBook::from_file(path)?;
    let player = book
        .lookup(id)
        .ok_or_else(|| anyhow!("Player '{}' not found in {}", id, path))?;
    println!("{} ({})", player.name, player.id);
    let bat = &player.batting;
    println!(
        "  Batting - SR: {}, avg: {}, runs: {}, balls: {}, 4s: {}, 6s: {}",
        opt(bat.strike_rate),
        opt(bat.average),
        bat.runs,
        bat.balls_faced,
        bat.fours,
        bat.sixes
    );
    let bowl = &player.bowling;
    println!(
        "  Bowling - econ: {}, avg: {}, wickets: {}, overs: {}, conceded: {}",
        opt(bowl.economy),
        opt(bowl.average),
        bowl.wickets,
        bowl.overs_bowled,
        bowl.runs_conceded
    );
    if player.statless {
        println!("  No recorded history; the simulator uses neutral defaults.");
    }
    Ok(())
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

fn parse_seed(value: Option<String>) -> Result<u64> {
    value
        .ok_or_else(|| anyhow!("--seed needs a value"))?
        .parse()
        .context("--seed must be an unsigned integer")
}

fn parse_bat_first(value: Option<String>) -> Result<Option<bool>> {
    match value.as_deref() {
        Some("a") => Ok(Some(true)),
        Some("b") => Ok(Some(false)),
        Some(other) => Err(anyhow!("--bat-first must be 'a' or 'b', got '{}'", other)),
        None => Err(anyhow!("--bat-first needs a value")),
    }
}
