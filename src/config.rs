use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://json-server-rbac.onrender.com";

/// Fixed pause between a failed event stream and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub reconnect_delay: Duration,
}

impl Config {
    pub fn new(api_base_url: &str) -> Self {
        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    /// Read `RBAC_API_URL`. A `.env` file, if any, is loaded by the binary
    /// before this runs.
    pub fn from_env() -> Self {
        match std::env::var("RBAC_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                log::info!("Using RBAC_API_URL from environment");
                Config::new(url.trim())
            }
            _ => Config::new(DEFAULT_API_URL),
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn events_url(&self) -> String {
        format!("{}/api/events", self.api_base_url)
    }
}
