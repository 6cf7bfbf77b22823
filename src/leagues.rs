use crate::error::{PredictError, PredictResult};

#[derive(Debug, Clone, Copy)]
pub struct LeagueInfo {
    pub name: &'static str,
    /// football-data.co.uk division code for the current-season CSV.
    pub code: &'static str,
    /// File stem of the locally kept archive of earlier seasons.
    pub archive_key: &'static str,
    pub teams: &'static [&'static str],
}

impl LeagueInfo {
    pub fn has_team(&self, team: &str) -> bool {
        self.teams.contains(&team)
    }

    pub fn sorted_teams(&self) -> Vec<&'static str> {
        let mut teams = self.teams.to_vec();
        teams.sort_unstable();
        teams
    }
}

pub const LEAGUES: &[LeagueInfo] = &[
    LeagueInfo {
        name: "English Premier League",
        code: "E0",
        archive_key: "epl",
        teams: &[
            "Arsenal",
            "Bournemouth",
            "Brighton",
            "Everton",
            "Newcastle",
            "Brentford",
            "Chelsea",
            "Man United",
            "Nott'm Forest",
            "Fulham",
            "Liverpool",
            "Wolves",
            "Tottenham",
            "Man City",
            "Aston Villa",
            "West Ham",
            "Crystal Palace",
            "Ipswich",
            "Leicester",
            "Southampton",
        ],
    },
    LeagueInfo {
        name: "LaLiga",
        code: "SP1",
        archive_key: "llg",
        teams: &[
            "Sevilla",
            "Sociedad",
            "Las Palmas",
            "Ath Bilbao",
            "Celta",
            "Villarreal",
            "Getafe",
            "Ath Madrid",
            "Mallorca",
            "Valencia",
            "Osasuna",
            "Girona",
            "Barcelona",
            "Betis",
            "Alaves",
            "Vallecano",
            "Real Madrid",
            "Valladolid",
            "Espanol",
            "Leganes",
        ],
    },
    LeagueInfo {
        name: "Serie A",
        code: "I1",
        archive_key: "sa",
        teams: &[
            "Empoli",
            "Genoa",
            "Inter",
            "Roma",
            "Lecce",
            "Udinese",
            "Torino",
            "Bologna",
            "Monza",
            "Milan",
            "Verona",
            "Fiorentina",
            "Juventus",
            "Lazio",
            "Napoli",
            "Cagliari",
            "Atalanta",
            "Parma",
            "Venezia",
            "Como",
        ],
    },
    LeagueInfo {
        name: "Bundesliga",
        code: "D1",
        archive_key: "bdl",
        teams: &[
            "Werder Bremen",
            "Augsburg",
            "Hoffenheim",
            "Leverkusen",
            "Stuttgart",
            "Wolfsburg",
            "Dortmund",
            "Union Berlin",
            "Ein Frankfurt",
            "RB Leipzig",
            "Freiburg",
            "Heidenheim",
            "M'gladbach",
            "Mainz",
            "Bayern Munich",
            "St Pauli",
            "Holstein Kiel",
        ],
    },
    LeagueInfo {
        name: "Ligue 1",
        code: "F1",
        archive_key: "l1",
        teams: &[
            "Nice",
            "Marseille",
            "Paris SG",
            "Brest",
            "Montpellier",
            "Nantes",
            "Rennes",
            "Strasbourg",
            "Lyon",
            "Toulouse",
            "Lille",
            "Le Havre",
            "Reims",
            "Monaco",
            "Lens",
            "Auxerre",
            "Angers",
            "St Etienne",
        ],
    },
    LeagueInfo {
        name: "Scottish Premier League",
        code: "SC0",
        archive_key: "spl",
        teams: &[
            "Celtic",
            "Dundee",
            "St Johnstone",
            "Kilmarnock",
            "Hibernian",
            "Rangers",
            "Ross County",
            "St Mirren",
            "Aberdeen",
            "Hearts",
            "Motherwell",
            "Dundee United",
        ],
    },
    LeagueInfo {
        name: "Championship",
        code: "E1",
        archive_key: "c",
        teams: &[
            "Sheffield Weds",
            "Blackburn",
            "Bristol City",
            "Middlesbrough",
            "Norwich",
            "Plymouth",
            "Stoke",
            "Swansea",
            "Watford",
            "Leicester",
            "Leeds",
            "Sunderland",
            "Coventry",
            "Cardiff",
            "Hull",
            "Ipswich",
            "Millwall",
            "Preston",
            "Southampton",
            "West Brom",
            "QPR",
            "Oxford",
            "Luton",
            "Derby",
            "Portsmouth",
            "Burnley",
            "Sheffield United",
        ],
    },
];

pub fn leagues() -> impl Iterator<Item = &'static LeagueInfo> {
    LEAGUES.iter()
}

pub fn find_league(name: &str) -> PredictResult<&'static LeagueInfo> {
    let wanted = name.trim();
    LEAGUES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| PredictError::UnknownLeague(wanted.to_string()))
}

pub fn teams(league: &str) -> PredictResult<Vec<&'static str>> {
    Ok(find_league(league)?.sorted_teams())
}

/// Boundary checks before any table work: known league, both teams in it, distinct teams.
pub fn validate_fixture(
    league: &str,
    home_team: &str,
    away_team: &str,
) -> PredictResult<&'static LeagueInfo> {
    let info = find_league(league)?;
    if home_team == away_team {
        return Err(PredictError::SameTeam(home_team.to_string()));
    }
    for team in [home_team, away_team] {
        if !info.has_team(team) {
            return Err(PredictError::UnknownTeam {
                league: info.name.to_string(),
                team: team.to_string(),
            });
        }
    }
    Ok(info)
}
