use std::path::PathBuf;

use anyhow::{Result, anyhow};

use matchday_predictor::backtest::{BacktestConfig, run_backtest};
use matchday_predictor::config::PredictorConfig;
use matchday_predictor::league_data;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut warmup = BacktestConfig::default().warmup;
    let mut json = false;
    let mut paths = Vec::new();
    for arg in &args {
        if let Some(raw) = arg.strip_prefix("--warmup=") {
            warmup = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("invalid --warmup value '{raw}'"))?;
        } else if arg == "--json" {
            json = true;
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if paths.is_empty() {
        return Err(anyhow!(
            "usage: backtest [--warmup=N] [--json] <results.csv>..."
        ));
    }

    let config = PredictorConfig::from_env();
    let table = league_data::load_tables(&paths)?;
    let report = run_backtest(
        &table,
        BacktestConfig {
            warmup,
            windows: config.windows,
            ..Default::default()
        },
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Matches loaded: {}", table.len());
    println!(
        "Fixtures: {} considered, {} predicted, {} skipped",
        report.fixtures_considered, report.metrics.samples, report.skipped
    );
    println!("Brier: {:.4}", report.metrics.brier);
    println!("Log loss: {:.4}", report.metrics.log_loss);
    println!("Accuracy: {:.1}%", report.metrics.accuracy * 100.0);
    for (label, bins) in [
        ("home", &report.home_bins),
        ("draw", &report.draw_bins),
        ("away", &report.away_bins),
    ] {
        println!("{label} calibration:");
        for bin in bins.iter().filter(|b| b.count > 0) {
            println!(
                "  {:.1}-{:.1}: n={} pred={:.3} actual={:.3}",
                bin.bucket_start, bin.bucket_end, bin.count, bin.avg_pred, bin.actual_rate
            );
        }
    }

    Ok(())
}
