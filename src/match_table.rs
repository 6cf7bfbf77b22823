use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullTimeResult {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
    #[serde(rename = "D")]
    Draw,
}

impl FullTimeResult {
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim() {
            "H" | "h" => Some(FullTimeResult::Home),
            "A" | "a" => Some(FullTimeResult::Away),
            "D" | "d" => Some(FullTimeResult::Draw),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            FullTimeResult::Home => 'H',
            FullTimeResult::Away => 'A',
            FullTimeResult::Draw => 'D',
        }
    }

    pub fn from_goals(home_goals: u32, away_goals: u32) -> Self {
        if home_goals > away_goals {
            FullTimeResult::Home
        } else if home_goals < away_goals {
            FullTimeResult::Away
        } else {
            FullTimeResult::Draw
        }
    }
}

/// One finished fixture. `result` is the stored full-time code and is what every
/// downstream classification reads; goals are never used to re-derive it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub result: FullTimeResult,
    pub home_shots_on_target: u32,
    pub away_shots_on_target: u32,
    pub home_corners: u32,
    pub away_corners: u32,
    pub home_yellow_cards: u32,
    pub away_yellow_cards: u32,
    pub home_red_cards: u32,
    pub away_red_cards: u32,
}

impl MatchRecord {
    /// Record with the result code taken from the score and all secondary counts zeroed.
    pub fn from_score(
        date: NaiveDate,
        home_team: &str,
        away_team: &str,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Self {
            date,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_goals,
            away_goals,
            result: FullTimeResult::from_goals(home_goals, away_goals),
            home_shots_on_target: 0,
            away_shots_on_target: 0,
            home_corners: 0,
            away_corners: 0,
            home_yellow_cards: 0,
            away_yellow_cards: 0,
            home_red_cards: 0,
            away_red_cards: 0,
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn is_pairing(&self, home_team: &str, away_team: &str) -> bool {
        self.home_team == home_team && self.away_team == away_team
    }

    pub fn both_teams_scored(&self) -> bool {
        self.home_goals > 0 && self.away_goals > 0
    }

    // Yellow and red count the same.
    pub fn home_cards(&self) -> u32 {
        self.home_yellow_cards + self.home_red_cards
    }

    pub fn away_cards(&self) -> u32 {
        self.away_yellow_cards + self.away_red_cards
    }

    /// Whether the stored result code agrees with the score.
    pub fn is_consistent(&self) -> bool {
        FullTimeResult::from_goals(self.home_goals, self.away_goals) == self.result
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTable {
    records: Vec<MatchRecord>,
}

impl MatchTable {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Concatenates `primary` then `secondary`, dropping exact duplicate fixtures and
    /// keeping the first occurrence.
    pub fn merge(primary: MatchTable, secondary: MatchTable) -> Self {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(primary.len() + secondary.len());
        for record in primary.records.into_iter().chain(secondary.records) {
            if seen.contains(&record) {
                continue;
            }
            seen.insert(record.clone());
            records.push(record);
        }
        Self { records }
    }

    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn teams(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        for record in &self.records {
            out.insert(record.home_team.as_str());
            out.insert(record.away_team.as_str());
        }
        out
    }
}

impl AsRef<[MatchRecord]> for MatchTable {
    fn as_ref(&self) -> &[MatchRecord] {
        &self.records
    }
}

impl FromIterator<MatchRecord> for MatchTable {
    fn from_iter<I: IntoIterator<Item = MatchRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MatchTable {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
