use std::env;
use std::path::PathBuf;

use crate::window::{FORM_WINDOW, HEAD_TO_HEAD_WINDOW};

const DEFAULT_DATA_DIR: &str = "resources";
const DEFAULT_SEASON: &str = "2425";
const DEFAULT_BASE_URL: &str = "https://www.football-data.co.uk/mmz4281";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizes {
    pub form: usize,
    pub head_to_head: usize,
}

impl Default for WindowSizes {
    fn default() -> Self {
        Self {
            form: FORM_WINDOW,
            head_to_head: HEAD_TO_HEAD_WINDOW,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub data_dir: PathBuf,
    pub season: String,
    pub base_url: String,
    pub http_timeout_secs: u64,
    // Skip the current-season download and use whatever is already on disk.
    pub offline: bool,
    pub windows: WindowSizes,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            season: DEFAULT_SEASON.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            offline: false,
            windows: WindowSizes::default(),
        }
    }
}

impl PredictorConfig {
    /// Reads `MATCHDAY_*` variables. Call `dotenvy` first if `.env` files should apply.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env_string("MATCHDAY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            season: env_string("MATCHDAY_SEASON").unwrap_or(defaults.season),
            base_url: env_string("MATCHDAY_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            http_timeout_secs: env_parse("MATCHDAY_HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.http_timeout_secs)
                .max(1),
            offline: env_string("MATCHDAY_OFFLINE").is_some_and(|v| is_truthy(&v)),
            windows: WindowSizes {
                form: env_parse("MATCHDAY_FORM_WINDOW")
                    .unwrap_or(defaults.windows.form)
                    .max(1),
                head_to_head: env_parse("MATCHDAY_H2H_WINDOW")
                    .unwrap_or(defaults.windows.head_to_head)
                    .max(1),
            },
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse::<T>().ok())
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
