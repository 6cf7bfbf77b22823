use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use log::error;
use serde_json::json;

use matchday_predictor::config::PredictorConfig;
use matchday_predictor::error::INSUFFICIENT_DATA_MESSAGE;
use matchday_predictor::predict::compute_prediction_with;
use matchday_predictor::{PredictError, PredictionResult, league_data, leagues};

const USAGE: &str = "usage: matchday_predictor --league <name> --home <team> --away <team> [--csv <path>]...
       matchday_predictor --leagues
       matchday_predictor --teams <league>";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();

    if args.iter().any(|a| a == "--leagues") {
        let names = leagues::leagues().map(|l| l.name).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json!({ "leagues": names }))?);
        return Ok(());
    }

    if let Some(league) = arg_value(&args, "--teams") {
        let response = match leagues::teams(&league) {
            Ok(teams) => json!({ "teams": teams }),
            Err(err) => json!({ "error": err.user_message() }),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let home = arg_value(&args, "--home");
    let away = arg_value(&args, "--away");
    let (Some(home), Some(away)) = (home, away) else {
        eprintln!("{USAGE}");
        return Err(anyhow!("--home and --away are required"));
    };
    let league = arg_value(&args, "--league");
    let csv_paths = arg_values(&args, "--csv")
        .into_iter()
        .map(PathBuf::from)
        .collect::<Vec<_>>();

    let config = PredictorConfig::from_env();
    let response = match run(&config, league.as_deref(), &home, &away, &csv_paths) {
        Ok(stats) => json!({ "stats": stats }),
        Err(err) => json!({ "error": boundary_message(&err) }),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run(
    config: &PredictorConfig,
    league: Option<&str>,
    home: &str,
    away: &str,
    csv_paths: &[PathBuf],
) -> Result<PredictionResult> {
    let table = match league {
        Some(name) => {
            let info = leagues::validate_fixture(name, home, away)?;
            if csv_paths.is_empty() {
                league_data::load_league_table(config, info)?
            } else {
                league_data::load_tables(csv_paths)?
            }
        }
        None if !csv_paths.is_empty() => league_data::load_tables(csv_paths)?,
        None => return Err(anyhow!("--league or --csv is required")),
    };

    let prediction = compute_prediction_with(home, away, &table, config.windows)
        .with_context(|| format!("predict {home} v {away}"))?;
    Ok(prediction)
}

fn boundary_message(err: &anyhow::Error) -> String {
    if let Some(predict_err) = err.downcast_ref::<PredictError>() {
        if matches!(predict_err, PredictError::InsufficientData(_)) {
            error!("{err:#}");
        }
        return predict_err.user_message();
    }
    error!("{err:#}");
    INSUFFICIENT_DATA_MESSAGE.to_string()
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    arg_values(args, name).into_iter().next()
}

fn arg_values(args: &[String], name: &str) -> Vec<String> {
    let prefix = format!("{name}=");
    let mut out = Vec::new();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            if is_flag_value(value) {
                out.push(value.trim().to_string());
            }
            continue;
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && is_flag_value(next)
        {
            out.push(next.trim().to_string());
        }
    }
    out
}

// An empty value or another `--flag` means the flag was given without a value.
fn is_flag_value(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && !trimmed.starts_with("--")
}
