use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;

use crate::match_table::{FullTimeResult, MatchRecord, MatchTable};

/// Columns we read from a football-data.co.uk results file; the rest are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "HomeTeam")]
    home_team: Option<String>,
    #[serde(rename = "AwayTeam")]
    away_team: Option<String>,
    #[serde(rename = "FTHG")]
    home_goals: Option<u32>,
    #[serde(rename = "FTAG")]
    away_goals: Option<u32>,
    #[serde(rename = "FTR")]
    result: Option<String>,
    #[serde(rename = "HST")]
    home_shots_on_target: Option<u32>,
    #[serde(rename = "AST")]
    away_shots_on_target: Option<u32>,
    #[serde(rename = "HC")]
    home_corners: Option<u32>,
    #[serde(rename = "AC")]
    away_corners: Option<u32>,
    #[serde(rename = "HY")]
    home_yellow_cards: Option<u32>,
    #[serde(rename = "AY")]
    away_yellow_cards: Option<u32>,
    #[serde(rename = "HR")]
    home_red_cards: Option<u32>,
    #[serde(rename = "AR")]
    away_red_cards: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    /// Loaded rows whose result code disagrees with the score. Kept as-is.
    pub inconsistent_results: usize,
}

pub fn load_table(path: &Path) -> Result<(MatchTable, IngestStats)> {
    let file =
        File::open(path).with_context(|| format!("open results csv {}", path.display()))?;
    parse_table(file).with_context(|| format!("parse results csv {}", path.display()))
}

pub fn parse_table<R: Read>(reader: R) -> Result<(MatchTable, IngestStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = MatchTable::default();
    let mut stats = IngestStats::default();

    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        let line = idx + 2;
        stats.rows_read += 1;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                stats.rows_skipped += 1;
                warn!("line {line}: unreadable row: {err}");
                continue;
            }
        };
        let Some(record) = row_to_record(row) else {
            stats.rows_skipped += 1;
            warn!("line {line}: missing or invalid required column");
            continue;
        };
        if !record.is_consistent() {
            stats.inconsistent_results += 1;
            warn!(
                "line {line}: result code {} disagrees with score {}-{} ({} v {})",
                record.result.code(),
                record.home_goals,
                record.away_goals,
                record.home_team,
                record.away_team
            );
        }
        table.push(record);
        stats.rows_loaded += 1;
    }

    Ok((table, stats))
}

/// football-data dates are day-first with either a 4- or 2-digit year.
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    // %Y would happily read "23" as year 23.
    let year_digits = s.rsplit('/').next().map(str::len)?;
    let fmt = if year_digits == 2 { "%d/%m/%y" } else { "%d/%m/%Y" };
    NaiveDate::parse_from_str(s, fmt).ok()
}

fn row_to_record(row: RawRow) -> Option<MatchRecord> {
    let home_team = row.home_team.filter(|s| !s.is_empty())?;
    let away_team = row.away_team.filter(|s| !s.is_empty())?;
    Some(MatchRecord {
        date: parse_match_date(row.date.as_deref()?)?,
        home_team,
        away_team,
        home_goals: row.home_goals?,
        away_goals: row.away_goals?,
        result: FullTimeResult::from_code(row.result.as_deref()?)?,
        home_shots_on_target: row.home_shots_on_target?,
        away_shots_on_target: row.away_shots_on_target?,
        home_corners: row.home_corners?,
        away_corners: row.away_corners?,
        home_yellow_cards: row.home_yellow_cards?,
        away_yellow_cards: row.away_yellow_cards?,
        home_red_cards: row.home_red_cards?,
        away_red_cards: row.away_red_cards?,
    })
}
