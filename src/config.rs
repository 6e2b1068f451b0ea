use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Directory holding the title tables and feature matrices
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for a single metadata request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Maximum number of titles kept in the metadata cache
    #[serde(default = "default_metadata_cache_capacity")]
    pub metadata_cache_capacity: usize,

    /// Whether unavailable metadata is cached like a successful lookup
    #[serde(default)]
    pub cache_failures: bool,

    /// Maximum number of browser sessions whose selection is remembered
    #[serde(default = "default_session_capacity")]
    pub session_capacity: usize,

    /// Minimum fuzzy score (0-100) for a title to match a search term
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,

    /// Maximum number of fuzzy search results
    #[serde(default = "default_fuzzy_limit")]
    pub fuzzy_limit: usize,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_metadata_cache_capacity() -> usize {
    128
}

fn default_session_capacity() -> usize {
    1024
}

fn default_fuzzy_threshold() -> u8 {
    80
}

fn default_fuzzy_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Request timeout for the metadata client
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
