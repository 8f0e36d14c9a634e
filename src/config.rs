use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for one crawl session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from
    pub start_url: String,

    /// Maximum number of pages to visit
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum link depth from the start URL
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Whether to fetch and honor robots.txt
    #[serde(default = "default_respect_robots_txt")]
    pub respect_robots_txt: bool,

    /// User-agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Default value for max_pages
fn default_max_pages() -> usize {
    50
}

/// Default value for max_depth
fn default_max_depth() -> usize {
    3
}

/// Default value for respect_robots_txt
fn default_respect_robots_txt() -> bool {
    true
}

/// Default user-agent string
fn default_user_agent() -> String {
    "SiteFixBot/1.0".to_string()
}

/// Default per-request timeout (30 seconds)
fn default_timeout_ms() -> u64 {
    30_000
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            respect_robots_txt: default_respect_robots_txt(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}
