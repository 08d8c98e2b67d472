//! CLI configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the flight vector endpoint; streaming is off when unset
    pub stream_url: Option<String>,
    /// Inject legend markup verbatim for every scene
    pub trust_legend: bool,
    pub stream_cache_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            stream_url: env::var("FIXMAP_STREAM_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            trust_legend: env::var("FIXMAP_TRUST_LEGEND")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            stream_cache_secs: env::var("FIXMAP_STREAM_CACHE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
        }
    }
}
