use serde::Deserialize;
use std::time::Duration;

/// Upstream launch API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint listing upcoming launches; `limit`/`offset` are appended
    pub base_url: String,

    /// Launches requested per page (default: 10)
    pub page_size: usize,

    /// Retries after the first failed attempt (default: 3)
    pub max_retries: u32,

    /// Fixed pause between attempts in milliseconds (default: 2000)
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ll.thespacedevs.com/2.2.0/launch/upcoming/".to_string(),
            page_size: 10,
            max_retries: 3,
            retry_delay_ms: 2000,
            timeout_secs: 10,
            user_agent: "launch-atlas/0.1.0".to_string(),
        }
    }
}

impl ApiConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the pause between retries as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
