//! Per-window derived statistics.
//!
//! A [`TeamStatSet`] describes a window from one team's point of view; a
//! [`HeadToHeadStatSet`] describes a pairing window with fixed home-side and
//! away-side fields, where "home side" always means the team named as home for the
//! fixture being predicted, not necessarily the venue of each historical match.

use serde::Serialize;

use crate::error::{PredictError, PredictResult};
use crate::match_table::{FullTimeResult, MatchRecord};
use crate::window::StatWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TeamResult {
    Win,
    Lose,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairingResult {
    HomeSideWin,
    AwaySideWin,
    Draw,
}

/// The four per-team quantities that get an expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Goals,
    ShotsOnTarget,
    Corners,
    Cards,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStatSet {
    pub team: String,
    pub results: Vec<TeamResult>,
    pub goals_for: Vec<u32>,
    pub goals_against: Vec<u32>,
    pub goals: Vec<u32>,
    pub btts: Vec<u32>,
    pub shots_on_target_for: Vec<u32>,
    pub shots_on_target_against: Vec<u32>,
    pub corners_for: Vec<u32>,
    pub corners_against: Vec<u32>,
    pub corners: Vec<u32>,
    pub cards_for: Vec<u32>,
    pub cards_against: Vec<u32>,
    pub cards: Vec<u32>,
}

impl TeamStatSet {
    pub fn from_window(team: &str, window: &StatWindow<'_>) -> Self {
        let mut out = TeamStatSet {
            team: team.to_string(),
            ..Default::default()
        };
        for m in window.iter() {
            let at_home = m.home_team == team;
            let side = if at_home {
                SideView::home(m)
            } else {
                SideView::away(m)
            };
            let other = if at_home {
                SideView::away(m)
            } else {
                SideView::home(m)
            };

            let result = match (at_home, m.result) {
                (true, FullTimeResult::Home) | (false, FullTimeResult::Away) => TeamResult::Win,
                (true, FullTimeResult::Away) | (false, FullTimeResult::Home) => TeamResult::Lose,
                _ => TeamResult::Draw,
            };

            out.results.push(result);
            out.goals_for.push(side.goals);
            out.goals_against.push(other.goals);
            out.goals.push(side.goals + other.goals);
            out.btts.push(u32::from(m.both_teams_scored()));
            out.shots_on_target_for.push(side.shots_on_target);
            out.shots_on_target_against.push(other.shots_on_target);
            out.corners_for.push(side.corners);
            out.corners_against.push(other.corners);
            out.corners.push(side.corners + other.corners);
            out.cards_for.push(side.cards);
            out.cards_against.push(other.cards);
            out.cards.push(side.cards + other.cards);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn result_rate(&self, wanted: TeamResult) -> PredictResult<f64> {
        rate(&self.results, wanted, &self.team)
    }

    pub fn stat_for(&self, stat: Stat) -> &[u32] {
        match stat {
            Stat::Goals => &self.goals_for,
            Stat::ShotsOnTarget => &self.shots_on_target_for,
            Stat::Corners => &self.corners_for,
            Stat::Cards => &self.cards_for,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadToHeadStatSet {
    pub home_team: String,
    pub away_team: String,
    pub results: Vec<PairingResult>,
    pub home_team_goals: Vec<u32>,
    pub away_team_goals: Vec<u32>,
    pub goals: Vec<u32>,
    pub btts: Vec<u32>,
    pub home_team_shots_on_target: Vec<u32>,
    pub away_team_shots_on_target: Vec<u32>,
    pub home_team_corners: Vec<u32>,
    pub away_team_corners: Vec<u32>,
    pub corners: Vec<u32>,
    pub home_team_cards: Vec<u32>,
    pub away_team_cards: Vec<u32>,
    pub cards: Vec<u32>,
}

impl HeadToHeadStatSet {
    /// Either-orientation window: sides are resolved per match from who actually hosted.
    pub fn from_window(home_team: &str, away_team: &str, window: &StatWindow<'_>) -> Self {
        let mut out = Self::empty(home_team, away_team);
        for m in window.iter() {
            let hosted = m.home_team == home_team;
            let (home_side, away_side) = if hosted {
                (SideView::home(m), SideView::away(m))
            } else {
                (SideView::away(m), SideView::home(m))
            };
            let result = match (hosted, m.result) {
                (true, FullTimeResult::Home) | (false, FullTimeResult::Away) => {
                    PairingResult::HomeSideWin
                }
                (true, FullTimeResult::Away) | (false, FullTimeResult::Home) => {
                    PairingResult::AwaySideWin
                }
                _ => PairingResult::Draw,
            };
            out.push(m, result, home_side, away_side);
        }
        out
    }

    /// Fixed-orientation window: every match has `home_team` at home by construction.
    pub fn from_fixed_window(home_team: &str, away_team: &str, window: &StatWindow<'_>) -> Self {
        let mut out = Self::empty(home_team, away_team);
        for m in window.iter() {
            let result = match m.result {
                FullTimeResult::Home => PairingResult::HomeSideWin,
                FullTimeResult::Away => PairingResult::AwaySideWin,
                FullTimeResult::Draw => PairingResult::Draw,
            };
            out.push(m, result, SideView::home(m), SideView::away(m));
        }
        out
    }

    fn empty(home_team: &str, away_team: &str) -> Self {
        Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            ..Default::default()
        }
    }

    fn push(&mut self, m: &MatchRecord, result: PairingResult, home: SideView, away: SideView) {
        self.results.push(result);
        self.home_team_goals.push(home.goals);
        self.away_team_goals.push(away.goals);
        self.goals.push(home.goals + away.goals);
        self.btts.push(u32::from(m.both_teams_scored()));
        self.home_team_shots_on_target.push(home.shots_on_target);
        self.away_team_shots_on_target.push(away.shots_on_target);
        self.home_team_corners.push(home.corners);
        self.away_team_corners.push(away.corners);
        self.corners.push(home.corners + away.corners);
        self.home_team_cards.push(home.cards);
        self.away_team_cards.push(away.cards);
        self.cards.push(home.cards + away.cards);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn result_rate(&self, wanted: PairingResult) -> PredictResult<f64> {
        let label = format!("{} v {}", self.home_team, self.away_team);
        rate(&self.results, wanted, &label)
    }

    /// "<team> Win" / "Draw" labels in window order.
    pub fn result_labels(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| match r {
                PairingResult::HomeSideWin => format!("{} Win", self.home_team),
                PairingResult::AwaySideWin => format!("{} Win", self.away_team),
                PairingResult::Draw => "Draw".to_string(),
            })
            .collect()
    }

    pub fn home_stat(&self, stat: Stat) -> &[u32] {
        match stat {
            Stat::Goals => &self.home_team_goals,
            Stat::ShotsOnTarget => &self.home_team_shots_on_target,
            Stat::Corners => &self.home_team_corners,
            Stat::Cards => &self.home_team_cards,
        }
    }

    pub fn away_stat(&self, stat: Stat) -> &[u32] {
        match stat {
            Stat::Goals => &self.away_team_goals,
            Stat::ShotsOnTarget => &self.away_team_shots_on_target,
            Stat::Corners => &self.away_team_corners,
            Stat::Cards => &self.away_team_cards,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SideView {
    goals: u32,
    shots_on_target: u32,
    corners: u32,
    cards: u32,
}

impl SideView {
    fn home(m: &MatchRecord) -> Self {
        Self {
            goals: m.home_goals,
            shots_on_target: m.home_shots_on_target,
            corners: m.home_corners,
            cards: m.home_cards(),
        }
    }

    fn away(m: &MatchRecord) -> Self {
        Self {
            goals: m.away_goals,
            shots_on_target: m.away_shots_on_target,
            corners: m.away_corners,
            cards: m.away_cards(),
        }
    }
}

/// Arithmetic mean; an empty sequence is reported instead of producing NaN.
pub fn mean(values: &[u32]) -> PredictResult<f64> {
    if values.is_empty() {
        return Err(PredictError::insufficient("mean of an empty sequence"));
    }
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    Ok(sum as f64 / values.len() as f64)
}

fn rate<T: PartialEq>(values: &[T], wanted: T, owner: &str) -> PredictResult<f64> {
    if values.is_empty() {
        return Err(PredictError::insufficient(format!(
            "no results in window for {owner}"
        )));
    }
    let hits = values.iter().filter(|v| **v == wanted).count();
    Ok(hits as f64 / values.len() as f64)
}
