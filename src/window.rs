use std::str::FromStr;

use crate::error::PredictError;
use crate::match_table::MatchRecord;

pub const FORM_WINDOW: usize = 5;
pub const HEAD_TO_HEAD_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

impl FromStr for Venue {
    type Err = PredictError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "home" => Ok(Venue::Home),
            "away" => Ok(Venue::Away),
            other => Err(PredictError::InvalidArgument(format!(
                "invalid venue '{other}', use 'home' or 'away'"
            ))),
        }
    }
}

/// Most recent first. Borrowed from the table it was selected from.
#[derive(Debug, Clone, Default)]
pub struct StatWindow<'a> {
    matches: Vec<&'a MatchRecord>,
}

impl<'a> StatWindow<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[&'a MatchRecord] {
        &self.matches
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MatchRecord> + '_ {
        self.matches.iter().copied()
    }
}

/// Every query accepts a `MatchTable` or a plain `[MatchRecord]` slice.
pub fn last_n_games<'a, T>(table: &'a T, team: &str, n: usize) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    select(table, n, |m| m.involves(team))
}

pub fn last_n_venue_games<'a, T>(
    table: &'a T,
    team: &str,
    n: usize,
    venue: Venue,
) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    match venue {
        Venue::Home => select(table, n, |m| m.home_team == team),
        Venue::Away => select(table, n, |m| m.away_team == team),
    }
}

/// String-typed venue entry point; anything but exactly "home" or "away" is rejected.
pub fn last_n_home_or_away_games<'a, T>(
    table: &'a T,
    team: &str,
    n: usize,
    venue: &str,
) -> Result<StatWindow<'a>, PredictError>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    let venue = venue.parse::<Venue>()?;
    Ok(last_n_venue_games(table, team, n, venue))
}

pub fn last_n_head_to_head<'a, T>(
    table: &'a T,
    team_a: &str,
    team_b: &str,
    n: usize,
) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    select(table, n, |m| {
        m.is_pairing(team_a, team_b) || m.is_pairing(team_b, team_a)
    })
}

pub fn last_n_head_to_head_fixed<'a, T>(
    table: &'a T,
    home_team: &str,
    away_team: &str,
    n: usize,
) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    select(table, n, |m| m.is_pairing(home_team, away_team))
}

pub fn last_two_head_to_head<'a, T>(
    table: &'a T,
    team_a: &str,
    team_b: &str,
) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    last_n_head_to_head(table, team_a, team_b, HEAD_TO_HEAD_WINDOW)
}

pub fn last_two_head_to_head_fixed<'a, T>(
    table: &'a T,
    home_team: &str,
    away_team: &str,
) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    last_n_head_to_head_fixed(table, home_team, away_team, HEAD_TO_HEAD_WINDOW)
}

// `sort_by` is stable: fixtures sharing a date keep their table order.
fn select<'a, T>(table: &'a T, n: usize, keep: impl Fn(&MatchRecord) -> bool) -> StatWindow<'a>
where
    T: AsRef<[MatchRecord]> + ?Sized,
{
    let mut matches: Vec<&MatchRecord> = table.as_ref().iter().filter(|m| keep(m)).collect();
    matches.sort_by(|a, b| b.date.cmp(&a.date));
    matches.truncate(n);
    StatWindow { matches }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::match_table::MatchTable;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn table() -> MatchTable {
        MatchTable::new(vec![
            MatchRecord::from_score(day(3), "Inter", "Milan", 1, 2),
            MatchRecord::from_score(day(1), "Milan", "Inter", 0, 0),
            MatchRecord::from_score(day(9), "Roma", "Inter", 1, 1),
            MatchRecord::from_score(day(6), "Inter", "Lazio", 3, 0),
            MatchRecord::from_score(day(12), "Inter", "Milan", 2, 2),
            MatchRecord::from_score(day(15), "Napoli", "Roma", 1, 0),
            MatchRecord::from_score(day(18), "Genoa", "Inter", 0, 1),
        ])
    }

    #[test]
    fn last_games_are_newest_first_and_truncated() {
        let t = table();
        let w = last_n_games(&t, "Inter", 5);
        let dates: Vec<_> = w.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![day(18), day(12), day(9), day(6), day(3)]);
    }

    #[test]
    fn venue_windows_are_strict() {
        let t = table();
        let home = last_n_venue_games(&t, "Inter", 5, Venue::Home);
        assert!(home.iter().all(|m| m.home_team == "Inter"));
        assert_eq!(home.len(), 3);

        let away = last_n_venue_games(&t, "Inter", 5, Venue::Away);
        assert!(away.iter().all(|m| m.away_team == "Inter"));
        assert_eq!(away.len(), 3);
    }

    #[test]
    fn unknown_venue_is_invalid_argument() {
        let t = table();
        let err = last_n_home_or_away_games(&t, "Inter", 5, "neutral").unwrap_err();
        assert!(matches!(err, PredictError::InvalidArgument(_)));
        assert!(last_n_home_or_away_games(&t, "Inter", 5, "away").is_ok());
        for raw in ["HOME", " Away ", "Home", ""] {
            let err = last_n_home_or_away_games(&t, "Inter", 5, raw).unwrap_err();
            assert!(matches!(err, PredictError::InvalidArgument(_)), "{raw:?}");
        }
    }

    #[test]
    fn head_to_head_orientation() {
        let t = table();
        let either = last_two_head_to_head(&t, "Inter", "Milan");
        assert_eq!(either.len(), 2);
        assert_eq!(either.matches()[0].date, day(12));
        assert_eq!(either.matches()[1].date, day(3));

        let reversed = last_n_head_to_head(&t, "Inter", "Milan", 5);
        assert!(reversed.iter().any(|m| m.home_team == "Milan"));

        let fixed = last_n_head_to_head_fixed(&t, "Milan", "Inter", 5);
        assert_eq!(fixed.len(), 1);
        assert!(fixed.iter().all(|m| m.is_pairing("Milan", "Inter")));
    }

    #[test]
    fn equal_dates_keep_table_order() {
        let t = MatchTable::new(vec![
            MatchRecord::from_score(day(4), "Inter", "Como", 1, 0),
            MatchRecord::from_score(day(4), "Parma", "Inter", 0, 2),
        ]);
        let w = last_n_games(&t, "Inter", 5);
        assert_eq!(w.matches()[0].away_team, "Como");
        assert_eq!(w.matches()[1].home_team, "Parma");
    }

    #[test]
    fn slice_prefix_sees_only_its_records() {
        let t = table();
        let prefix = &t.records()[..4];
        let w = last_n_games(prefix, "Inter", 5);
        let dates: Vec<_> = w.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![day(9), day(6), day(3), day(1)]);
    }

    #[test]
    fn no_history_is_empty_window() {
        let t = table();
        assert!(last_n_games(&t, "Venezia", 5).is_empty());
        assert!(last_two_head_to_head_fixed(&t, "Inter", "Inter").is_empty());
    }
}
