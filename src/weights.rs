use std::fmt;

use serde::Serialize;

use crate::error::{PredictError, PredictResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    HomeAwayForm,
    OverallForm,
    OppositionForm,
    HeadToHead,
    HeadToHeadFixed,
}

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvidenceSource::HomeAwayForm => "home_away_form",
            EvidenceSource::OverallForm => "overall_form",
            EvidenceSource::OppositionForm => "opposition_form",
            EvidenceSource::HeadToHead => "h2h",
            EvidenceSource::HeadToHeadFixed => "home_away_h2h",
        };
        f.write_str(name)
    }
}

/// Base weights for one output, as data.
#[derive(Debug, Clone, Copy)]
pub struct WeightTable {
    pub name: &'static str,
    pub entries: &'static [(EvidenceSource, f64)],
}

pub const RESULT_WEIGHTS: WeightTable = WeightTable {
    name: "result",
    entries: &[
        (EvidenceSource::HomeAwayForm, 0.25),
        (EvidenceSource::OverallForm, 0.20),
        (EvidenceSource::OppositionForm, 0.20),
        (EvidenceSource::HeadToHead, 0.15),
        (EvidenceSource::HeadToHeadFixed, 0.20),
    ],
};

pub const DRAW_WEIGHTS: WeightTable = WeightTable {
    name: "draw",
    entries: &[
        (EvidenceSource::HomeAwayForm, 0.30),
        (EvidenceSource::OverallForm, 0.35),
        (EvidenceSource::HeadToHead, 0.15),
        (EvidenceSource::HeadToHeadFixed, 0.20),
    ],
};

pub const BTTS_WEIGHTS: WeightTable = WeightTable {
    name: "btts",
    entries: &[
        (EvidenceSource::HomeAwayForm, 0.40),
        (EvidenceSource::OverallForm, 0.30),
        (EvidenceSource::HeadToHead, 0.15),
        (EvidenceSource::HeadToHeadFixed, 0.15),
    ],
};

pub const TEAM_STAT_WEIGHTS: WeightTable = WeightTable {
    name: "team_stat",
    entries: &[
        (EvidenceSource::HomeAwayForm, 0.30),
        (EvidenceSource::OverallForm, 0.25),
        (EvidenceSource::HeadToHead, 0.20),
        (EvidenceSource::HeadToHeadFixed, 0.25),
    ],
};

pub const TOTAL_GOALS_WEIGHTS: WeightTable = WeightTable {
    name: "total_goals",
    entries: &[
        (EvidenceSource::HomeAwayForm, 0.25),
        (EvidenceSource::OverallForm, 0.25),
        (EvidenceSource::HeadToHead, 0.20),
        (EvidenceSource::HeadToHeadFixed, 0.30),
    ],
};

impl WeightTable {
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Present sources only, already scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedWeights {
    entries: Vec<(EvidenceSource, f64)>,
}

impl AdjustedWeights {
    pub fn get(&self, source: EvidenceSource) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EvidenceSource, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Scales every present weight by `1 + missing / present` so the present sources absorb
/// the missing mass while keeping their ratios. Missing sources are dropped entirely.
pub fn redistribute(
    table: &WeightTable,
    missing: &[EvidenceSource],
) -> PredictResult<AdjustedWeights> {
    let mut present = Vec::with_capacity(table.entries.len());
    let mut missing_total = 0.0;
    for (source, weight) in table.entries {
        if missing.contains(source) {
            missing_total += weight;
        } else {
            present.push((*source, *weight));
        }
    }

    let present_total: f64 = present.iter().map(|(_, w)| w).sum();
    if present_total <= 0.0 {
        return Err(PredictError::insufficient(format!(
            "every evidence source for {} is missing",
            table.name
        )));
    }

    let factor = 1.0 + missing_total / present_total;
    Ok(AdjustedWeights {
        entries: present.into_iter().map(|(s, w)| (s, w * factor)).collect(),
    })
}
