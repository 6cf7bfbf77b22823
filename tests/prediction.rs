use chrono::{Days, NaiveDate};

use matchday_predictor::config::WindowSizes;
use matchday_predictor::error::{INSUFFICIENT_DATA_MESSAGE, SAME_TEAM_MESSAGE};
use matchday_predictor::fake_table::synthetic_season;
use matchday_predictor::predict::build_evidence;
use matchday_predictor::weights::EvidenceSource;
use matchday_predictor::{MatchRecord, MatchTable, PredictError, compute_prediction};

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 10).unwrap() + Days::new(offset)
}

fn game(offset: u64, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
    MatchRecord::from_score(day(offset), home, away, hg, ag)
}

/// Leeds won their last five, all at home and all 2-0. Hull's last five were all away:
/// two defeats, a draw and two wins. The sides never met.
fn form_only_table() -> MatchTable {
    MatchTable::new(vec![
        game(0, "Leeds", "Derby", 2, 0),
        game(1, "Burnley", "Hull", 2, 0),
        game(7, "Leeds", "Luton", 2, 0),
        game(8, "Watford", "Hull", 3, 1),
        game(14, "Leeds", "Stoke", 2, 0),
        game(15, "QPR", "Hull", 1, 1),
        game(21, "Leeds", "Millwall", 2, 0),
        game(22, "Sunderland", "Hull", 0, 2),
        game(28, "Leeds", "Norwich", 2, 0),
        game(29, "Coventry", "Hull", 1, 3),
    ])
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn form_only_fixture_matches_closed_form() {
    let prediction = compute_prediction("Leeds", "Hull", &form_only_table()).expect("prediction");
    assert_eq!(
        prediction.missing_sources,
        vec![EvidenceSource::HeadToHead, EvidenceSource::HeadToHeadFixed]
    );

    // Both result and draw tables lose 0.35 of weight to the missing meetings.
    let factor = 1.0 + (0.15 + 0.20) / (0.25 + 0.20 + 0.20);
    let home = (0.25 * 1.0 + 0.20 * 1.0 + 0.20 * 0.4) * factor;
    let away = (0.25 * 0.4 + 0.20 * 0.4 + 0.20 * 0.0) * factor;
    let draw = (0.30 * (0.0 + 0.2) / 2.0 + 0.35 * (0.0 + 0.2) / 2.0) * factor;
    let total = home + away + draw;

    assert!(close(prediction.home_win_prob, home / total * 100.0));
    assert!(close(prediction.away_win_prob, away / total * 100.0));
    assert!(close(prediction.draw_prob, draw / total * 100.0));

    // Leeds never conceded, Hull scored in three of five.
    assert!(close(prediction.btts_prob, 30.0));
    assert!(close(prediction.expected_total_goals, 2.4));
    assert!(close(prediction.home_team_stats.expected_goals, 2.0));
    assert!(close(prediction.away_team_stats.expected_goals, 1.4));
}

/// Both meeting windows are filled: Leeds drew when hosting Hull, Hull won the return
/// game at home.
fn full_evidence_table() -> MatchTable {
    MatchTable::new(vec![
        game(0, "Leeds", "Derby", 1, 0),
        game(1, "Leeds", "Hull", 1, 1),
        game(2, "Leeds", "Luton", 0, 0),
        game(3, "Stoke", "Hull", 1, 3),
        game(4, "Hull", "Leeds", 2, 1),
    ])
}

#[test]
fn full_evidence_fixture_matches_closed_form() {
    let table = full_evidence_table();
    let evidence = build_evidence(&table, "Leeds", "Hull", WindowSizes::default());
    let h2h = evidence.head_to_head.as_ref().expect("either-order meetings");
    assert_eq!(h2h.result_labels(), vec!["Hull Win", "Draw"]);
    assert_eq!(h2h.away_team_goals, vec![2, 1]);
    let fixed = evidence.head_to_head_fixed.as_ref().expect("fixed meeting");
    assert_eq!(fixed.result_labels(), vec!["Draw"]);

    let prediction = compute_prediction("Leeds", "Hull", &table).expect("prediction");
    assert!(prediction.missing_sources.is_empty());

    // Leeds home W 1/3 D 2/3, overall W 1/4 D 1/2 L 1/4. Hull away W 1/2 D 1/2,
    // overall W 2/3 D 1/3. Meetings: Hull 1/2, draw 1/2; fixed meeting a draw.
    let home = 0.25 * (1.0 / 3.0) + 0.20 * 0.25 + 0.20 * 0.0 + 0.15 * 0.0 + 0.20 * 0.0;
    let away = 0.25 * 0.5 + 0.20 * (2.0 / 3.0) + 0.20 * 0.0 + 0.15 * 0.5 + 0.20 * 0.0;
    let draw = 0.30 * (2.0 / 3.0 + 0.5) / 2.0
        + 0.35 * (0.5 + 1.0 / 3.0) / 2.0
        + 0.15 * 0.5
        + 0.20 * 1.0;
    let total = home + away + draw;
    assert!(close(prediction.home_win_prob, home / total * 100.0));
    assert!(close(prediction.away_win_prob, away / total * 100.0));
    assert!(close(prediction.draw_prob, draw / total * 100.0));

    let btts = 0.40 * (1.0 / 3.0 + 1.0) / 2.0 + 0.30 * (0.5 + 1.0) / 2.0 + 0.15 + 0.15;
    assert!(close(prediction.btts_prob, btts * 100.0));

    let total_goals =
        0.25 * (1.0 + 3.0) / 2.0 + 0.25 * (1.5 + 3.0) / 2.0 + 0.20 * 2.5 + 0.30 * 2.0;
    assert!(close(prediction.expected_total_goals, total_goals));

    let home_goals = 0.30 * (2.0 / 3.0) + 0.25 * 0.75 + 0.20 * 1.0 + 0.25 * 1.0;
    let away_goals = 0.30 * 2.0 + 0.25 * 2.0 + 0.20 * 1.5 + 0.25 * 1.0;
    assert!(close(prediction.home_team_stats.expected_goals, home_goals));
    assert!(close(prediction.away_team_stats.expected_goals, away_goals));
    assert!(close(prediction.away_team_stats.expected_corners, 0.0));
}

#[test]
fn single_game_per_form_window_still_predicts() {
    let table = MatchTable::new(vec![
        game(0, "Leeds", "Derby", 1, 1),
        game(3, "Luton", "Hull", 0, 1),
    ]);
    let prediction = compute_prediction("Leeds", "Hull", &table).expect("minimum viable data");

    let total = prediction.home_win_prob + prediction.away_win_prob + prediction.draw_prob;
    assert!(close(total, 100.0));
    assert!(prediction.btts_prob.is_finite());
    assert!(prediction.expected_total_goals.is_finite());
    assert_eq!(prediction.missing_sources.len(), 2);
}

#[test]
fn same_team_is_rejected_with_the_user_message() {
    let err = compute_prediction("Leeds", "Leeds", &form_only_table()).unwrap_err();
    assert!(matches!(err, PredictError::SameTeam(_)));
    assert_eq!(err.user_message(), SAME_TEAM_MESSAGE);
}

#[test]
fn team_without_home_games_is_insufficient() {
    // Hull only ever played away.
    let err = compute_prediction("Hull", "Leeds", &form_only_table()).unwrap_err();
    assert!(matches!(err, PredictError::InsufficientData(_)));
    assert_eq!(err.user_message(), INSUFFICIENT_DATA_MESSAGE);
}

#[test]
fn unknown_team_is_insufficient() {
    let err = compute_prediction("Leeds", "Oxford", &form_only_table()).unwrap_err();
    assert!(matches!(err, PredictError::InsufficientData(_)));
}

#[test]
fn reversed_meeting_only_fills_the_either_order_window() {
    let mut table = form_only_table();
    table.push(game(35, "Hull", "Leeds", 0, 0));
    table.push(game(36, "Leeds", "Blackburn", 2, 0));

    let prediction = compute_prediction("Leeds", "Hull", &table).expect("prediction");
    assert_eq!(
        prediction.missing_sources,
        vec![EvidenceSource::HeadToHeadFixed]
    );
    let total = prediction.home_win_prob + prediction.away_win_prob + prediction.draw_prob;
    assert!(close(total, 100.0));
}

#[test]
fn synthetic_seasons_always_produce_bounded_predictions() {
    let teams = ["Lens", "Lille", "Nice", "Brest", "Reims", "Nantes"];
    for seed in 0..16 {
        let table = synthetic_season(&teams, day(0), seed);
        for home in teams {
            for away in teams {
                if home == away {
                    continue;
                }
                let p = compute_prediction(home, away, &table)
                    .unwrap_or_else(|err| panic!("seed {seed} {home} v {away}: {err}"));

                let total = p.home_win_prob + p.away_win_prob + p.draw_prob;
                assert!(close(total, 100.0), "seed {seed} {home} v {away}: {total}");
                for prob in [p.home_win_prob, p.away_win_prob, p.draw_prob, p.btts_prob] {
                    assert!((0.0..=100.0 + 1e-9).contains(&prob));
                }
                assert!(p.expected_total_goals >= 0.0);
                for stats in [p.home_team_stats, p.away_team_stats] {
                    assert!(stats.expected_goals >= 0.0);
                    assert!(stats.expected_shots_on_target >= 0.0);
                    assert!(stats.expected_corners >= 0.0);
                    assert!(stats.expected_cards >= 0.0);
                }
            }
        }
    }
}

#[test]
fn prediction_is_deterministic() {
    let table = synthetic_season(&["Lens", "Lille", "Nice", "Brest"], day(0), 3);
    let a = compute_prediction("Nice", "Brest", &table).expect("prediction");
    let b = compute_prediction("Nice", "Brest", &table).expect("prediction");
    assert_eq!(a, b);
}
