//! Relay configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://chiku-bots.vercel.app/Chiku";
pub const DEFAULT_HISTORY_BUDGET: usize = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CHIKU_UPSTREAM_URL '{url}': {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("CHIKU_HISTORY_BUDGET must be greater than zero")]
    ZeroHistoryBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub upstream_url: String,
    pub history_budget: usize,
    pub timeouts: UpstreamTimeouts,
}

impl RelayConfig {
    /// Build typed relay config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CHIKU_UPSTREAM_URL`: upstream chat endpoint
    /// - `CHIKU_HISTORY_BUDGET`: max forwarded characters, default 2000
    /// - `CHIKU_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CHIKU_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream URL does not parse or the history
    /// budget is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_url = std::env::var("CHIKU_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());
        reqwest::Url::parse(&upstream_url)
            .map_err(|e| ConfigError::InvalidUpstreamUrl { url: upstream_url.clone(), reason: e.to_string() })?;

        let history_budget = env_parse("CHIKU_HISTORY_BUDGET", DEFAULT_HISTORY_BUDGET);
        if history_budget == 0 {
            return Err(ConfigError::ZeroHistoryBudget);
        }

        let timeouts = UpstreamTimeouts {
            request_secs: env_parse("CHIKU_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("CHIKU_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { port: env_parse("PORT", DEFAULT_PORT), upstream_url, history_budget, timeouts })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
