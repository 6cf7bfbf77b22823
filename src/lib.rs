pub mod aggregate;
pub mod backtest;
pub mod calibration;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod fake_table;
pub mod http_client;
pub mod league_data;
pub mod leagues;
pub mod match_table;
pub mod predict;
pub mod team_stats;
pub mod weights;
pub mod window;

pub use aggregate::{ExpectedTeamStats, PredictionResult};
pub use error::{PredictError, PredictResult};
pub use match_table::{FullTimeResult, MatchRecord, MatchTable};
pub use predict::compute_prediction;
