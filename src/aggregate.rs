use log::debug;
use serde::Serialize;

use crate::error::{PredictError, PredictResult};
use crate::team_stats::{HeadToHeadStatSet, PairingResult, Stat, TeamResult, TeamStatSet, mean};
use crate::weights::{
    AdjustedWeights, BTTS_WEIGHTS, DRAW_WEIGHTS, EvidenceSource, RESULT_WEIGHTS,
    TEAM_STAT_WEIGHTS, TOTAL_GOALS_WEIGHTS, redistribute,
};

/// The six stat sets behind one prediction. The four form sets are required; either
/// head-to-head set may be absent (or empty) and is then dropped from every output.
#[derive(Debug, Clone)]
pub struct EvidenceSet {
    pub home_team: String,
    pub away_team: String,
    pub home_home: TeamStatSet,
    pub away_away: TeamStatSet,
    pub home_overall: TeamStatSet,
    pub away_overall: TeamStatSet,
    pub head_to_head: Option<HeadToHeadStatSet>,
    pub head_to_head_fixed: Option<HeadToHeadStatSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedTeamStats {
    pub expected_goals: f64,
    pub expected_shots_on_target: f64,
    pub expected_corners: f64,
    pub expected_cards: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    pub draw_prob: f64,
    pub btts_prob: f64,
    pub expected_total_goals: f64,
    pub home_team_stats: ExpectedTeamStats,
    pub away_team_stats: ExpectedTeamStats,
    pub missing_sources: Vec<EvidenceSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl EvidenceSet {
    pub fn head_to_head(&self) -> Option<&HeadToHeadStatSet> {
        self.head_to_head.as_ref().filter(|s| !s.is_empty())
    }

    pub fn head_to_head_fixed(&self) -> Option<&HeadToHeadStatSet> {
        self.head_to_head_fixed.as_ref().filter(|s| !s.is_empty())
    }

    pub fn missing_sources(&self) -> Vec<EvidenceSource> {
        let mut out = Vec::new();
        if self.head_to_head().is_none() {
            out.push(EvidenceSource::HeadToHead);
        }
        if self.head_to_head_fixed().is_none() {
            out.push(EvidenceSource::HeadToHeadFixed);
        }
        out
    }

    fn ensure_form_present(&self) -> PredictResult<()> {
        let required = [
            (&self.home_home, "home form"),
            (&self.away_away, "away form"),
            (&self.home_overall, "overall form"),
            (&self.away_overall, "overall form"),
        ];
        for (set, label) in required {
            if set.is_empty() {
                return Err(PredictError::insufficient(format!(
                    "{label} for {} is empty",
                    set.team
                )));
            }
        }
        Ok(())
    }

    fn pairing(&self, source: EvidenceSource) -> PredictResult<&HeadToHeadStatSet> {
        let set = match source {
            EvidenceSource::HeadToHead => self.head_to_head(),
            EvidenceSource::HeadToHeadFixed => self.head_to_head_fixed(),
            _ => None,
        };
        set.ok_or_else(|| PredictError::insufficient(format!("{source} has no matches")))
    }

    fn venue_form(&self, side: Side) -> &TeamStatSet {
        match side {
            Side::Home => &self.home_home,
            Side::Away => &self.away_away,
        }
    }

    fn overall_form(&self, side: Side) -> &TeamStatSet {
        match side {
            Side::Home => &self.home_overall,
            Side::Away => &self.away_overall,
        }
    }

    fn win_rate(&self, side: Side, source: EvidenceSource) -> PredictResult<f64> {
        let opponent = match side {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        };
        let pairing_win = match side {
            Side::Home => PairingResult::HomeSideWin,
            Side::Away => PairingResult::AwaySideWin,
        };
        match source {
            EvidenceSource::HomeAwayForm => self.venue_form(side).result_rate(TeamResult::Win),
            EvidenceSource::OverallForm => self.overall_form(side).result_rate(TeamResult::Win),
            EvidenceSource::OppositionForm => {
                self.venue_form(opponent).result_rate(TeamResult::Lose)
            }
            EvidenceSource::HeadToHead | EvidenceSource::HeadToHeadFixed => {
                self.pairing(source)?.result_rate(pairing_win)
            }
        }
    }

    fn draw_rate(&self, source: EvidenceSource) -> PredictResult<f64> {
        match source {
            EvidenceSource::HomeAwayForm => Ok((self.home_home.result_rate(TeamResult::Draw)?
                + self.away_away.result_rate(TeamResult::Draw)?)
                / 2.0),
            EvidenceSource::OverallForm => Ok((self.home_overall.result_rate(TeamResult::Draw)?
                + self.away_overall.result_rate(TeamResult::Draw)?)
                / 2.0),
            EvidenceSource::HeadToHead | EvidenceSource::HeadToHeadFixed => {
                self.pairing(source)?.result_rate(PairingResult::Draw)
            }
            EvidenceSource::OppositionForm => Err(not_weighted(source, "draw")),
        }
    }

    fn btts_rate(&self, source: EvidenceSource) -> PredictResult<f64> {
        match source {
            EvidenceSource::HomeAwayForm => {
                Ok((mean(&self.home_home.btts)? + mean(&self.away_away.btts)?) / 2.0)
            }
            EvidenceSource::OverallForm => {
                Ok((mean(&self.home_overall.btts)? + mean(&self.away_overall.btts)?) / 2.0)
            }
            EvidenceSource::HeadToHead | EvidenceSource::HeadToHeadFixed => {
                mean(&self.pairing(source)?.btts)
            }
            EvidenceSource::OppositionForm => Err(not_weighted(source, "btts")),
        }
    }

    fn team_stat(&self, side: Side, stat: Stat, source: EvidenceSource) -> PredictResult<f64> {
        match source {
            EvidenceSource::HomeAwayForm => mean(self.venue_form(side).stat_for(stat)),
            EvidenceSource::OverallForm => mean(self.overall_form(side).stat_for(stat)),
            EvidenceSource::HeadToHead | EvidenceSource::HeadToHeadFixed => {
                let pairing = self.pairing(source)?;
                match side {
                    Side::Home => mean(pairing.home_stat(stat)),
                    Side::Away => mean(pairing.away_stat(stat)),
                }
            }
            EvidenceSource::OppositionForm => Err(not_weighted(source, "team stats")),
        }
    }

    fn total_goals(&self, source: EvidenceSource) -> PredictResult<f64> {
        match source {
            EvidenceSource::HomeAwayForm => {
                Ok((mean(&self.home_home.goals)? + mean(&self.away_away.goals)?) / 2.0)
            }
            EvidenceSource::OverallForm => {
                Ok((mean(&self.home_overall.goals)? + mean(&self.away_overall.goals)?) / 2.0)
            }
            EvidenceSource::HeadToHead | EvidenceSource::HeadToHeadFixed => {
                mean(&self.pairing(source)?.goals)
            }
            EvidenceSource::OppositionForm => Err(not_weighted(source, "total goals")),
        }
    }

    fn expected_team_stats(
        &self,
        side: Side,
        weights: &AdjustedWeights,
    ) -> PredictResult<ExpectedTeamStats> {
        let value = |stat: Stat| weighted_sum(weights, |source| self.team_stat(side, stat, source));
        Ok(ExpectedTeamStats {
            expected_goals: value(Stat::Goals)?,
            expected_shots_on_target: value(Stat::ShotsOnTarget)?,
            expected_corners: value(Stat::Corners)?,
            expected_cards: value(Stat::Cards)?,
        })
    }
}

/// Combines the evidence into one prediction. Each output redistributes its own base
/// table over the sources that are present.
pub fn aggregate(evidence: &EvidenceSet) -> PredictResult<PredictionResult> {
    evidence.ensure_form_present()?;
    let missing = evidence.missing_sources();
    if !missing.is_empty() {
        debug!(
            "{} v {}: dropping evidence {:?}",
            evidence.home_team, evidence.away_team, missing
        );
    }

    let result_weights = redistribute(&RESULT_WEIGHTS, &missing)?;
    let home_win = weighted_sum(&result_weights, |s| evidence.win_rate(Side::Home, s))? * 100.0;
    let away_win = weighted_sum(&result_weights, |s| evidence.win_rate(Side::Away, s))? * 100.0;

    let draw_weights = redistribute(&DRAW_WEIGHTS, &missing)?;
    let draw = weighted_sum(&draw_weights, |s| evidence.draw_rate(s))? * 100.0;

    let (home_win_prob, away_win_prob, draw_prob) = normalize_outcomes(home_win, away_win, draw)?;

    let btts_weights = redistribute(&BTTS_WEIGHTS, &missing)?;
    let btts_prob = weighted_sum(&btts_weights, |s| evidence.btts_rate(s))? * 100.0;

    let stat_weights = redistribute(&TEAM_STAT_WEIGHTS, &missing)?;
    let home_team_stats = evidence.expected_team_stats(Side::Home, &stat_weights)?;
    let away_team_stats = evidence.expected_team_stats(Side::Away, &stat_weights)?;

    let goals_weights = redistribute(&TOTAL_GOALS_WEIGHTS, &missing)?;
    let expected_total_goals = weighted_sum(&goals_weights, |s| evidence.total_goals(s))?;

    Ok(PredictionResult {
        home_win_prob,
        away_win_prob,
        draw_prob,
        btts_prob,
        expected_total_goals,
        home_team_stats,
        away_team_stats,
        missing_sources: missing,
    })
}

fn weighted_sum(
    weights: &AdjustedWeights,
    value: impl Fn(EvidenceSource) -> PredictResult<f64>,
) -> PredictResult<f64> {
    let mut total = 0.0;
    for (source, weight) in weights.iter() {
        total += value(source)? * weight;
    }
    Ok(total)
}

/// Rescales the three outcome percentages so they sum to exactly 100.
pub fn normalize_outcomes(home: f64, away: f64, draw: f64) -> PredictResult<(f64, f64, f64)> {
    let total = home + away + draw;
    if !total.is_finite() || total <= 0.0 {
        return Err(PredictError::insufficient(
            "outcome probabilities sum to zero",
        ));
    }
    Ok((home / total * 100.0, away / total * 100.0, draw / total * 100.0))
}

fn not_weighted(source: EvidenceSource, output: &str) -> PredictError {
    PredictError::InvalidArgument(format!("{source} carries no weight for {output}"))
}
