use super::*;

const SQUAD: &str = r#"[
    {
        "player_id": 1,
        "player_name": "A Opener",
        "strike_rate": "132.5",
        "bat_avg": 34.2,
        "runs": "812*",
        "balls_faced": 613,
        "4s": 71,
        "6s": "18",
        "overs_bowled": 0,
        "economy": null
    },
    {
        "player_id": "CLUB_0042",
        "player_name": "B Allrounder",
        "strike_rate": 101.0,
        "runs": 455,
        "balls_faced": 450,
        "fours": 30,
        "sixes": 5,
        "wickets": 24,
        "overs_bowled": 61.4,
        "runs_conceded": 588,
        "economy": 9.6,
        "bowl_avg": 24.5
    },
    {
        "player_id": 3,
        "player_name": "C Blank"
    },
    {
        "player_name": "no id, skipped"
    }
]"#;

#[test]
fn squad_rows_parse_leniently() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    assert_eq!(book.len(), 3);

    let opener = book.get("LMS_0001").expect("numeric id should normalize");
    assert_eq!(opener.name, "A Opener");
    assert_eq!(opener.batting.strike_rate, Some(132.5));
    assert_eq!(opener.batting.runs, 812.0);
    assert_eq!(opener.batting.fours, 71);
    assert_eq!(opener.batting.sixes, 18);
    assert_eq!(opener.bowling.economy, None);
    assert!(!opener.statless);
}

#[test]
fn short_id_lookup_accepts_all_forms() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    assert_eq!(book.lookup("1").map(|p| p.name.as_str()), Some("A Opener"));
    assert_eq!(book.lookup("0001").map(|p| p.name.as_str()), Some("A Opener"));
    assert_eq!(book.lookup("LMS_0001").map(|p| p.name.as_str()), Some("A Opener"));
    assert_eq!(book.lookup("42").map(|p| p.name.as_str()), Some("B Allrounder"));
    assert_eq!(book.lookup("CLUB_0042").map(|p| p.name.as_str()), Some("B Allrounder"));
    assert!(book.lookup("999").is_none());
}

#[test]
fn statless_flag_is_derived_once() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    assert!(book.lookup("3").expect("blank row keeps id").statless);
    assert!(!book.lookup("42").expect("allrounder exists").statless);

    let fresh = Player::unknown("X_01", "Nobody");
    assert!(fresh.statless);
}

#[test]
fn rows_without_ids_are_dropped() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    assert!(book.players().all(|p| !p.id.is_empty()));
}

#[test]
fn squad_order_is_preserved() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    let names: Vec<&str> = book.players().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A Opener", "B Allrounder", "C Blank"]);
}

#[test]
fn team_sheet_resolves_short_ids() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    let team = r#"{
        "team_name": "Sunday XI",
        "keeper_id": "LMS_0003",
        "team": [
            {"player_id": "1"},
            {"player_id": "CLUB_0042"},
            {"player_id": "3"},
            {"player_id": "missing"}
        ]
    }"#;
    let sheet = TeamSheet::from_json_str(team, &book).expect("team should load");
    assert_eq!(sheet.name, "Sunday XI");
    assert_eq!(sheet.players.len(), 3);
    assert_eq!(sheet.keeper_id.as_deref(), Some("LMS_0003"));
}

#[test]
fn role_ids_are_canonicalized() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    let team = r#"{
        "team_name": "Sunday XI",
        "captain_id": "42",
        "keeper_id": "3",
        "team": [{"player_id": "1"}, {"player_id": "42"}, {"player_id": "3"}]
    }"#;
    let sheet = TeamSheet::from_json_str(team, &book).expect("team should load");
    assert_eq!(sheet.captain_id.as_deref(), Some("CLUB_0042"));
    assert_eq!(sheet.keeper_id.as_deref(), Some("LMS_0003"));

    let unresolved = r#"{
        "team_name": "Sunday XI",
        "keeper_id": "999",
        "team": [{"player_id": "1"}]
    }"#;
    let sheet = TeamSheet::from_json_str(unresolved, &book).expect("team should load");
    assert_eq!(sheet.keeper_id, None);
}

#[test]
fn empty_team_is_an_error() {
    let book = PlayerBook::from_json_str(SQUAD).expect("squad should parse");
    assert!(TeamSheet::from_json_str(r#"{"team_name": "x", "team": []}"#, &book).is_err());
}
