use serde::Serialize;

use crate::aggregate::PredictionResult;
use crate::match_table::FullTimeResult;

// Keeps log loss finite when a model puts zero mass on what happened.
const MIN_PROB: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];
}

impl From<FullTimeResult> for Outcome {
    fn from(result: FullTimeResult) -> Self {
        match result {
            FullTimeResult::Home => Outcome::Home,
            FullTimeResult::Draw => Outcome::Draw,
            FullTimeResult::Away => Outcome::Away,
        }
    }
}

/// Unit-scale outcome probabilities for one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prob3 {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl Prob3 {
    pub fn from_prediction(p: &PredictionResult) -> Self {
        Self {
            home: p.home_win_prob / 100.0,
            draw: p.draw_prob / 100.0,
            away: p.away_win_prob / 100.0,
        }
    }

    pub fn of(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    /// Most likely outcome; ties go home, then draw.
    pub fn favourite(&self) -> Outcome {
        Outcome::ALL
            .into_iter()
            .rev()
            .max_by(|a, b| self.of(*a).total_cmp(&self.of(*b)))
            .unwrap_or(Outcome::Home)
    }

    fn squared_error(&self, actual: Outcome) -> f64 {
        Outcome::ALL
            .into_iter()
            .map(|o| {
                let hit = if o == actual { 1.0 } else { 0.0 };
                (self.of(o) - hit).powi(2)
            })
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub samples: usize,
    pub brier: f64,
    pub log_loss: f64,
    pub accuracy: f64,
}

/// Reliability of one outcome class inside `[bucket_start, bucket_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationBin {
    pub bucket_start: f64,
    pub bucket_end: f64,
    pub count: usize,
    pub avg_pred: f64,
    pub actual_rate: f64,
}

/// Multi-class Brier score, log loss and hit rate. Mismatched inputs give empty metrics.
pub fn evaluate_probs(predictions: &[Prob3], outcomes: &[Outcome]) -> Metrics {
    if predictions.is_empty() || predictions.len() != outcomes.len() {
        return Metrics::default();
    }

    let pairs = || predictions.iter().zip(outcomes.iter().copied());
    let n = predictions.len() as f64;
    let brier = pairs().map(|(p, o)| p.squared_error(o)).sum::<f64>() / n;
    let log_loss = pairs()
        .map(|(p, o)| -p.of(o).clamp(MIN_PROB, 1.0).ln())
        .sum::<f64>()
        / n;
    let hits = pairs().filter(|(p, o)| p.favourite() == *o).count();

    Metrics {
        samples: predictions.len(),
        brier,
        log_loss,
        accuracy: hits as f64 / n,
    }
}

pub fn calibration_bins(
    predictions: &[Prob3],
    outcomes: &[Outcome],
    class: Outcome,
    bins: usize,
) -> Vec<CalibrationBin> {
    let bins = bins.max(2);
    let width = 1.0 / bins as f64;
    let mut out: Vec<CalibrationBin> = (0..bins)
        .map(|i| CalibrationBin {
            bucket_start: i as f64 * width,
            bucket_end: (i + 1) as f64 * width,
            count: 0,
            avg_pred: 0.0,
            actual_rate: 0.0,
        })
        .collect();

    // Sums first, turned into means below.
    for (p, outcome) in predictions.iter().zip(outcomes) {
        let prob = p.of(class).clamp(0.0, 1.0);
        let bin = &mut out[((prob * bins as f64) as usize).min(bins - 1)];
        bin.count += 1;
        bin.avg_pred += prob;
        if *outcome == class {
            bin.actual_rate += 1.0;
        }
    }
    for bin in out.iter_mut().filter(|b| b.count > 0) {
        bin.avg_pred /= bin.count as f64;
        bin.actual_rate /= bin.count as f64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(home: f64, draw: f64, away: f64) -> Prob3 {
        Prob3 { home, draw, away }
    }

    #[test]
    fn certain_and_right_scores_perfectly() {
        let preds = [p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0)];
        let m = evaluate_probs(&preds, &Outcome::ALL);
        assert_eq!(m.samples, 3);
        assert!(m.brier < 1e-12);
        assert!(m.log_loss < 1e-9);
        assert!((m.accuracy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_forecast_has_known_scores() {
        let third = 1.0 / 3.0;
        let m = evaluate_probs(&[p(third, third, third)], &[Outcome::Draw]);
        assert!((m.brier - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.log_loss - 3f64.ln()).abs() < 1e-12);
        // Ties go to the home side.
        assert_eq!(m.accuracy, 0.0);
    }

    #[test]
    fn mismatched_lengths_give_empty_metrics() {
        assert_eq!(evaluate_probs(&[p(0.5, 0.3, 0.2)], &[]), Metrics::default());
    }

    #[test]
    fn favourite_breaks_ties_home_then_draw() {
        assert_eq!(p(0.4, 0.4, 0.2).favourite(), Outcome::Home);
        assert_eq!(p(0.2, 0.4, 0.4).favourite(), Outcome::Draw);
        assert_eq!(p(0.2, 0.3, 0.5).favourite(), Outcome::Away);
    }

    #[test]
    fn bins_cover_unit_interval() {
        let preds = [p(0.05, 0.45, 0.5), p(1.0, 0.0, 0.0)];
        let outcomes = [Outcome::Away, Outcome::Home];
        let bins = calibration_bins(&preds, &outcomes, Outcome::Home, 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[9].count, 1);
        assert!((bins[0].avg_pred - 0.05).abs() < 1e-12);
        assert!((bins[9].actual_rate - 1.0).abs() < 1e-12);
        assert!((bins[9].bucket_end - 1.0).abs() < 1e-12);
    }
}
