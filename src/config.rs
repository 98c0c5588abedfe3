//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like identification sent with every request; some mirrors answer
/// 403 to unknown agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL templates for the upstream repository
    #[serde(default)]
    pub endpoints: Endpoints,

    /// User-Agent header sent on both requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for the abstract page request, in seconds
    #[serde(default = "default_title_timeout")]
    pub title_timeout_secs: u64,

    /// Timeout for the PDF request, in seconds (payloads are large)
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Progress is reported whenever this many bytes have accumulated
    #[serde(default = "default_progress_step")]
    pub progress_step_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            user_agent: default_user_agent(),
            title_timeout_secs: default_title_timeout(),
            download_timeout_secs: default_download_timeout(),
            progress_step_bytes: default_progress_step(),
        }
    }
}

impl FetchConfig {
    /// Timeout for the abstract page request
    pub fn title_timeout(&self) -> Duration {
        Duration::from_secs(self.title_timeout_secs)
    }

    /// Timeout for the PDF request
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// URL templates for the abstract page and the PDF resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Base URL for abstract/landing pages
    #[serde(default = "default_abs_base")]
    pub abs_base: String,

    /// Base URL for PDF resources
    #[serde(default = "default_pdf_base")]
    pub pdf_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            abs_base: default_abs_base(),
            pdf_base: default_pdf_base(),
        }
    }
}

impl Endpoints {
    /// Abstract page URL for a paper ID
    pub fn abs_url(&self, id: &str) -> String {
        format!("{}/{}", self.abs_base.trim_end_matches('/'), id)
    }

    /// PDF resource URL for a paper ID
    pub fn pdf_url(&self, id: &str) -> String {
        format!("{}/{}", self.pdf_base.trim_end_matches('/'), id)
    }
}

fn default_abs_base() -> String {
    "https://arxiv.org/abs".to_string()
}

fn default_pdf_base() -> String {
    "https://arxiv.org/pdf".to_string()
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_title_timeout() -> u64 {
    10
}

fn default_download_timeout() -> u64 {
    30
}

fn default_progress_step() -> u64 {
    1024 * 1024
}

/// Load configuration from a file
pub fn load_config(path: &PathBuf) -> Result<FetchConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("ARXIV_FETCH"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("arxiv-fetch.toml")];
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(".config/arxiv-fetch/config.toml"));
    }

    candidates.into_iter().find(|p| p.is_file())
}
