use log::debug;

use crate::aggregate::{EvidenceSet, PredictionResult, aggregate};
use crate::config::WindowSizes;
use crate::error::{PredictError, PredictResult};
use crate::match_table::MatchRecord;
use crate::team_stats::{HeadToHeadStatSet, TeamStatSet};
use crate::window::{
    Venue, last_n_games, last_n_head_to_head, last_n_head_to_head_fixed, last_n_venue_games,
};

/// Runs the six window queries and turns each into its stat set. Head-to-head sets are
/// `None` when their window is empty.
pub fn build_evidence<T>(
    table: &T,
    home_team: &str,
    away_team: &str,
    windows: WindowSizes,
) -> EvidenceSet
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    let home_overall = last_n_games(table, home_team, windows.form);
    let away_overall = last_n_games(table, away_team, windows.form);
    let home_home = last_n_venue_games(table, home_team, windows.form, Venue::Home);
    let away_away = last_n_venue_games(table, away_team, windows.form, Venue::Away);
    let h2h = last_n_head_to_head(table, home_team, away_team, windows.head_to_head);
    let h2h_fixed = last_n_head_to_head_fixed(table, home_team, away_team, windows.head_to_head);

    debug!(
        "{home_team} v {away_team}: windows home={} away={} overall={}/{} h2h={} h2h_fixed={}",
        home_home.len(),
        away_away.len(),
        home_overall.len(),
        away_overall.len(),
        h2h.len(),
        h2h_fixed.len()
    );

    EvidenceSet {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_home: TeamStatSet::from_window(home_team, &home_home),
        away_away: TeamStatSet::from_window(away_team, &away_away),
        home_overall: TeamStatSet::from_window(home_team, &home_overall),
        away_overall: TeamStatSet::from_window(away_team, &away_overall),
        head_to_head: (!h2h.is_empty())
            .then(|| HeadToHeadStatSet::from_window(home_team, away_team, &h2h)),
        head_to_head_fixed: (!h2h_fixed.is_empty())
            .then(|| HeadToHeadStatSet::from_fixed_window(home_team, away_team, &h2h_fixed)),
    }
}

pub fn compute_prediction<T>(
    home_team: &str,
    away_team: &str,
    table: &T,
) -> PredictResult<PredictionResult>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    compute_prediction_with(home_team, away_team, table, WindowSizes::default())
}

/// Accepts a `MatchTable` or any record slice, such as a date-sorted history prefix.
pub fn compute_prediction_with<T>(
    home_team: &str,
    away_team: &str,
    table: &T,
    windows: WindowSizes,
) -> PredictResult<PredictionResult>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    if home_team == away_team {
        return Err(PredictError::SameTeam(home_team.to_string()));
    }
    let evidence = build_evidence(table, home_team, away_team, windows);
    aggregate(&evidence)
}
