use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use crate::config::PredictorConfig;
use crate::csv_source;
use crate::http_client::http_client;
use crate::leagues::LeagueInfo;
use crate::match_table::MatchTable;

pub fn season_csv_url(config: &PredictorConfig, league: &LeagueInfo) -> String {
    format!("{}/{}/{}.csv", config.base_url, config.season, league.code)
}

pub fn current_season_path(config: &PredictorConfig, league: &LeagueInfo) -> PathBuf {
    config.data_dir.join(format!("{}.csv", league.code))
}

pub fn archive_path(config: &PredictorConfig, league: &LeagueInfo) -> PathBuf {
    config.data_dir.join(format!("{}.csv", league.archive_key))
}

/// Downloads the current-season file and swaps it into place.
pub fn download_current_season(config: &PredictorConfig, league: &LeagueInfo) -> Result<PathBuf> {
    let client = http_client(config.http_timeout_secs)?;
    let url = season_csv_url(config, league);
    let resp = client
        .get(&url)
        .send()
        .with_context(|| format!("request {url}"))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {status} for {url}"));
    }
    let body = resp.bytes().context("failed reading body")?;

    let path = current_season_path(config, league);
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data dir {}", config.data_dir.display()))?;
    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, &body).context("write season csv")?;
    fs::rename(&tmp, &path).context("swap season csv")?;
    info!("downloaded {} ({} bytes) to {}", url, body.len(), path.display());
    Ok(path)
}

/// Archive seasons merged with the current season, duplicates dropped. A failed
/// download falls back to the last saved current-season file.
pub fn load_league_table(config: &PredictorConfig, league: &LeagueInfo) -> Result<MatchTable> {
    if !config.offline
        && let Err(err) = download_current_season(config, league)
    {
        warn!("{}: current season download failed: {err:#}", league.name);
    }

    let archive = load_if_present(&archive_path(config, league))?;
    let current = load_if_present(&current_season_path(config, league))?;
    let table = MatchTable::merge(archive, current);
    if table.is_empty() {
        return Err(anyhow!(
            "no match data for {} under {}",
            league.name,
            config.data_dir.display()
        ));
    }
    info!("{}: {} matches loaded", league.name, table.len());
    Ok(table)
}

/// Loads several result files and merges them in the given order.
pub fn load_tables(paths: &[PathBuf]) -> Result<MatchTable> {
    let mut merged = MatchTable::default();
    for path in paths {
        let (table, stats) = csv_source::load_table(path)?;
        info!(
            "{}: {} rows loaded, {} skipped",
            path.display(),
            stats.rows_loaded,
            stats.rows_skipped
        );
        merged = MatchTable::merge(merged, table);
    }
    Ok(merged)
}

fn load_if_present(path: &Path) -> Result<MatchTable> {
    if !path.exists() {
        warn!("{} not found, skipping", path.display());
        return Ok(MatchTable::default());
    }
    let (table, stats) = csv_source::load_table(path)?;
    if stats.rows_skipped > 0 {
        warn!("{}: skipped {} rows", path.display(), stats.rows_skipped);
    }
    Ok(table)
}
