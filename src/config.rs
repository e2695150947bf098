//! Build-time Configuration
//!
//! The app is a static bundle, so settings are baked in at build time from
//! `DIY_DASH_API_URL` and `DIY_DASH_LOG`.

use log::LevelFilter;

/// Production API gateway
pub const DEFAULT_API_BASE_URL: &str =
    "https://xic1t3v249.execute-api.us-west-2.amazonaws.com/prod";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every request path is appended to (no trailing slash)
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Config {
    /// Read the values captured at compile time
    pub fn from_env() -> Self {
        Self::new(option_env!("DIY_DASH_API_URL"), option_env!("DIY_DASH_LOG"))
    }

    pub fn new(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            log_level,
        }
    }
}
