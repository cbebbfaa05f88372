//! Full-match behavior: toss, target, result and reproducibility.

use lms_cricket_core::config::MatchConfig;
use lms_cricket_core::data::{PlayerBook, TeamSheet};
use lms_cricket_core::engine::{MatchEngine, MatchResult};

fn squad_json() -> String {
    let rows: Vec<String> = (1..=16)
        .map(|i| {
            format!(
                r#"{{"player_id": {i}, "player_name": "Player {i}",
                     "strike_rate": "{sr}", "bat_avg": {avg}, "runs": "{runs}*",
                     "balls_faced": {balls}, "4s": {fours}, "6s": {sixes},
                     "economy": {econ}, "wickets": {wkts}, "overs_bowled": {overs},
                     "runs_conceded": {conceded}}}"#,
                sr = 80 + i * 4,
                avg = 12 + i,
                runs = 200 + i * 30,
                balls = 220 + i * 20,
                fours = 10 + i,
                sixes = i,
                econ = 7 + i % 5,
                wkts = 5 + i,
                overs = 30 + i,
                conceded = 250 + i * 10,
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn make_teams() -> (TeamSheet, TeamSheet) {
    let book = PlayerBook::from_json_str(&squad_json()).expect("squad parses");
    let falcons: Vec<_> = (1..=8)
        .map(|i| book.lookup(&i.to_string()).expect("player exists").clone())
        .collect();
    let miners: Vec<_> = (9..=16)
        .map(|i| book.lookup(&i.to_string()).expect("player exists").clone())
        .collect();
    (
        TeamSheet::new("Falcons", falcons).with_keeper("LMS_0003"),
        TeamSheet::new("Miners", miners).with_keeper("LMS_0011"),
    )
}

#[test]
fn the_same_seed_reproduces_the_whole_report() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());

    let report_a = engine.simulate(&falcons, &miners, 2024, None);
    let report_b = engine.simulate(&falcons, &miners, 2024, None);
    assert_eq!(report_a, report_b);
}

#[test]
fn the_target_is_one_more_than_the_first_innings() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());

    for seed in [1, 7, 99] {
        let report = engine.simulate(&falcons, &miners, seed, None);
        assert_eq!(report.target, report.first_innings.runs + 1);
    }
}

#[test]
fn the_toss_override_fixes_the_batting_order() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());

    let report = engine.simulate(&falcons, &miners, 5, Some(true));
    assert_eq!(report.first_batting, "Falcons");
    assert_eq!(report.second_batting, "Miners");

    let report = engine.simulate(&falcons, &miners, 5, Some(false));
    assert_eq!(report.first_batting, "Miners");
    assert_eq!(report.second_batting, "Falcons");
}

#[test]
fn the_result_agrees_with_the_totals() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());

    for seed in 0..20 {
        let report = engine.simulate(&falcons, &miners, seed, None);
        let first = report.first_innings.runs;
        let second = report.second_innings.runs;
        match &report.result {
            MatchResult::WonByRuns { team, runs } => {
                assert_eq!(team, &report.first_batting);
                assert_eq!(*runs, first - second);
            }
            MatchResult::WonByWickets { team, wickets } => {
                assert_eq!(team, &report.second_batting);
                assert!(second >= report.target);
                assert_eq!(*wickets, 8 - report.second_innings.wickets);
            }
            MatchResult::Tied => assert_eq!(first, second),
        }
        assert_eq!(report.result_text, report.result.text());
    }
}

#[test]
fn innings_invariants_hold_for_every_seed() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());

    for seed in 0..20 {
        let report = engine.simulate(&falcons, &miners, seed, None);
        for innings in [&report.first_innings, &report.second_innings] {
            assert!(innings.balls <= 100);
            assert!(innings.wickets <= 8);
            assert_eq!(innings.runs, innings.batter_runs() + innings.extras.total());
            let faced: u32 = innings.batsmen.iter().map(|b| b.balls).sum();
            assert_eq!(faced, innings.balls);
        }
        // the keeper never bowls
        let miners_fielding = if report.first_batting == "Falcons" {
            &report.first_innings
        } else {
            &report.second_innings
        };
        assert!(miners_fielding.bowlers.iter().all(|b| b.id != "LMS_0011"));
    }
}

#[test]
fn a_report_serializes_to_export_json() {
    let (falcons, miners) = make_teams();
    let engine = MatchEngine::new(MatchConfig::lms());
    let report = engine.simulate(&falcons, &miners, 11, Some(true));

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["seed"], 11);
    assert_eq!(value["first_batting"], "Falcons");
    assert!(value["first_innings"]["batsmen"].is_array());
    assert!(value["result_text"].is_string());
}
