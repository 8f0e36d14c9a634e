// Re-export modules
pub mod classify;
pub mod config;
pub mod crawlers;
pub mod fetcher;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod robots;

// Re-export commonly used types for convenience
pub use classify::{PageRole, RoleClassifier, inbound_link_counts, priority_score};
pub use config::CrawlConfig;
pub use crawlers::web::SiteCrawler;
pub use results::{CrawlResult, CrawlStats, Headings, PageLink};

use std::error::Error;
use std::path::Path;
use tokio::sync::mpsc;

/// Builder for configuring and running one crawl session.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use sitefix_crawler::CrawlSession;
///
/// let mut rx = CrawlSession::new("https://example.com")
///     .with_max_pages(25)
///     .with_max_depth(2)
///     .generate()
///     .await?;
/// while let Some(page) = rx.recv().await {
///     println!("{} ({} words)", page.url, page.word_count);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CrawlSession {
    config: CrawlConfig,
}

impl CrawlSession {
    /// Create a session for the given start URL with default settings
    pub fn new(start_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(start_url),
        }
    }

    /// Create a session from an existing configuration
    pub fn with_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Load the configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config: CrawlConfig::from_file(path)?,
        })
    }

    /// Load the configuration from a JSON string
    pub fn with_config_str(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config: CrawlConfig::from_json(json)?,
        })
    }

    /// Override the page ceiling
    pub fn with_max_pages(mut self, value: usize) -> Self {
        self.config.max_pages = value;
        self
    }

    /// Override the depth ceiling
    pub fn with_max_depth(mut self, value: usize) -> Self {
        self.config.max_depth = value;
        self
    }

    /// Override the user-agent string
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.config.user_agent = value.to_string();
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout_ms(mut self, value: u64) -> Self {
        self.config.timeout_ms = value;
        self
    }

    /// Enable or disable robots.txt compliance
    pub fn with_respect_robots_txt(mut self, value: bool) -> Self {
        self.config.respect_robots_txt = value;
        self
    }

    /// The assembled configuration
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Build a crawler the caller drives directly with
    /// [`SiteCrawler::next_page`]
    pub fn into_crawler(self) -> Result<SiteCrawler, Box<dyn Error>> {
        SiteCrawler::new(self.config)
    }

    /// Start the crawl on a background task and get a receiver for pages.
    /// Dropping the receiver stops the crawl.
    pub async fn generate(self) -> Result<mpsc::Receiver<CrawlResult>, Box<dyn Error>> {
        crawlers::web::start(&self.config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let session = CrawlSession::new("https://example.com")
            .with_max_pages(10)
            .with_max_depth(1)
            .with_user_agent("TestBot")
            .with_respect_robots_txt(false);
        let config = session.config();
        assert_eq!(config.start_url, "https://example.com");
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.user_agent, "TestBot");
        assert!(!config.respect_robots_txt);
    }

    #[test]
    fn test_config_str_session() {
        let session = CrawlSession::with_config_str(
            r#"{"start_url": "https://example.com", "max_depth": 5}"#,
        )
        .unwrap();
        assert_eq!(session.config().max_depth, 5);
        assert_eq!(session.config().max_pages, 50);
    }
}
