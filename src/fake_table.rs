use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::match_table::{FullTimeResult, MatchRecord, MatchTable};

/// Deterministic synthetic season: every ordered pairing plays once, a few fixtures
/// per matchday, matchdays a week apart. Used by the bench and by tests that need a
/// realistic-looking table without fixtures on disk.
pub fn synthetic_season(teams: &[&str], start: NaiveDate, seed: u64) -> MatchTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let per_day = (teams.len() / 2).max(1);

    let mut pairings = Vec::new();
    for home in teams {
        for away in teams {
            if home != away {
                pairings.push((*home, *away));
            }
        }
    }

    pairings
        .into_iter()
        .enumerate()
        .map(|(idx, (home, away))| {
            let date = start + Days::new((idx / per_day) as u64 * 7);
            random_match(&mut rng, date, home, away)
        })
        .collect()
}

fn random_match(rng: &mut StdRng, date: NaiveDate, home: &str, away: &str) -> MatchRecord {
    let home_goals = goals(rng, 1.5);
    let away_goals = goals(rng, 1.1);
    MatchRecord {
        date,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals,
        away_goals,
        result: FullTimeResult::from_goals(home_goals, away_goals),
        home_shots_on_target: home_goals + rng.gen_range(1..=6),
        away_shots_on_target: away_goals + rng.gen_range(0..=5),
        home_corners: rng.gen_range(2..=10),
        away_corners: rng.gen_range(1..=8),
        home_yellow_cards: rng.gen_range(0..=4),
        away_yellow_cards: rng.gen_range(0..=5),
        home_red_cards: u32::from(rng.gen_bool(0.05)),
        away_red_cards: u32::from(rng.gen_bool(0.07)),
    }
}

// Poisson sample by inversion, capped at 9.
fn goals(rng: &mut StdRng, lambda: f64) -> u32 {
    let u: f64 = rng.gen_range(0.0..1.0);
    let mut p = (-lambda).exp();
    let mut cdf = p;
    let mut k = 0u32;
    while u > cdf && k < 9 {
        k += 1;
        p *= lambda / k as f64;
        cdf += p;
    }
    k
}
