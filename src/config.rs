use anyhow::{Context, Result};
use derivative::Derivative;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Where the extraction service lives and how to reach it.
#[derive(Derivative, Clone)]
#[derivative(Debug, Default)]
pub struct ClientConfig {
    #[derivative(Default(value = "DEFAULT_API_URL.to_string()"))]
    pub api_url: String,
    /// Relative `api_url` values are resolved against this.
    #[derivative(Default(value = "DEFAULT_ORIGIN.to_string()"))]
    pub origin: String,
    #[derivative(Default(value = "Duration::from_secs(10)"))]
    pub connect_timeout: Duration,
    /// Whole-request bound for `GET /health`. Uploads are left unbounded.
    #[derivative(Default(value = "Duration::from_secs(5)"))]
    pub health_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(api_url) =
            std::env::var("FRAME_EXTRACTOR_API_URL").or_else(|_| std::env::var("API_URL"))
        {
            config.api_url = api_url;
        }

        if let Ok(origin) = std::env::var("FRAME_EXTRACTOR_ORIGIN") {
            config.origin = origin;
        }

        if let Ok(secs) = std::env::var("FRAME_EXTRACTOR_CONNECT_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .context("FRAME_EXTRACTOR_CONNECT_TIMEOUT_SECS is invalid")?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Ok(secs) = std::env::var("FRAME_EXTRACTOR_HEALTH_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .context("FRAME_EXTRACTOR_HEALTH_TIMEOUT_SECS is invalid")?;
            config.health_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Absolute base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        let api_url = self.api_url.trim_end_matches('/');
        if api_url.starts_with("http://") || api_url.starts_with("https://") {
            api_url.to_string()
        } else {
            let origin = self.origin.trim_end_matches('/');
            let path = api_url.trim_start_matches('/');
            if path.is_empty() {
                origin.to_string()
            } else {
                format!("{}/{}", origin, path)
            }
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    pub fn extract_url(&self) -> String {
        self.endpoint("extract")
    }

    pub fn download_url(&self, download_id: &str) -> String {
        self.endpoint(&format!("download/{}", download_id))
    }

    pub fn health_url(&self) -> String {
        self.endpoint("health")
    }
}
