use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use crowdfunding::{Config, GraphQlTransport};
use dioxus_logger::tracing::debug;
use gloo_net::http::Request;

/// Compile-time settings for the wasm build, see [`Config::from_lookup`].
pub fn build_config() -> Config {
    Config::from_lookup(|key| {
        let value = match key {
            "CROWDFUNDING_API_URL" => option_env!("CROWDFUNDING_API_URL"),
            "CROWDFUNDING_NAME" => option_env!("CROWDFUNDING_NAME"),
            "STATUS_POLL_INTERVAL_MS" => option_env!("STATUS_POLL_INTERVAL_MS"),
            "STRICT_TRANSLATIONS" => option_env!("STRICT_TRANSLATIONS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// GraphQL transport over the browser's fetch.
pub struct GlooTransport {
    url: String,
}

impl GlooTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Uses the configured endpoint during local development and the
    /// same-origin `/graphql` endpoint everywhere else.
    pub fn from_config(config: &Config) -> Self {
        let explicit = option_env!("CROWDFUNDING_API_URL").is_some();
        let url = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .map(|hostname| {
                if explicit || hostname == "localhost" || hostname == "127.0.0.1" {
                    config.api_url.clone()
                } else {
                    "/graphql".to_string()
                }
            })
            .unwrap_or_else(|| config.api_url.clone());

        Self::new(url)
    }
}

#[async_trait(?Send)]
impl GraphQlTransport for GlooTransport {
    async fn post(&self, body: String) -> Result<String> {
        debug!("POST {}", self.url);

        let response = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| anyhow!("Failed to build request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("Request to {} failed: {}", self.url, e))?;

        if !response.ok() {
            bail!("HTTP error: {}", response.status());
        }

        response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response: {}", e))
    }
}
