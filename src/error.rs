use thiserror::Error;

pub const INSUFFICIENT_DATA_MESSAGE: &str = "not enough data to predict this fixture";
pub const SAME_TEAM_MESSAGE: &str = "Home and Away teams must be different!";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown league: {0}")]
    UnknownLeague(String),

    #[error("unknown team '{team}' for league {league}")]
    UnknownTeam { league: String, team: String },

    #[error("home and away team are both {0}")]
    SameTeam(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

impl PredictError {
    pub fn insufficient(what: impl Into<String>) -> Self {
        PredictError::InsufficientData(what.into())
    }

    /// Message shown at the request boundary. Argument problems keep their detail,
    /// everything data-related collapses into one opaque message.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::SameTeam(_) => SAME_TEAM_MESSAGE.to_string(),
            PredictError::InvalidArgument(_)
            | PredictError::UnknownLeague(_)
            | PredictError::UnknownTeam { .. } => self.to_string(),
            PredictError::InsufficientData(_) => INSUFFICIENT_DATA_MESSAGE.to_string(),
        }
    }
}

pub type PredictResult<T> = std::result::Result<T, PredictError>;
