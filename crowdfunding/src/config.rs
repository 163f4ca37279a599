use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/graphql";
pub const DEFAULT_CAMPAIGN: &str = "REPUBLIK";
pub const DEFAULT_STATUS_POLL_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub campaign_name: String,
    pub status_poll_interval: Duration,
    /// Refuse to start when the catalog lacks keys the widgets need.
    pub strict_translations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, e.g. `option_env!` values baked
    /// into a wasm build. Unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup("CROWDFUNDING_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            campaign_name: lookup("CROWDFUNDING_NAME")
                .unwrap_or_else(|| DEFAULT_CAMPAIGN.to_string()),
            status_poll_interval: Duration::from_millis(
                lookup("STATUS_POLL_INTERVAL_MS")
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(DEFAULT_STATUS_POLL_INTERVAL_MS),
            ),
            strict_translations: lookup("STRICT_TRANSLATIONS")
                .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
