// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::CrawlerConfig;
pub use crawlers::{HttpFetcher, PageFetcher, WebCrawler};
pub use error::{Error, Result};
pub use results::{CrawlRecord, SubPageRecord};

use std::path::Path;

/// Builder for a career-page crawl over one or more seed URLs
pub struct CareerCrawler {
    config: CrawlerConfig,
    deep: bool,
}

impl Default for CareerCrawler {
    fn default() -> Self {
        Self::new()
    }
}

impl CareerCrawler {
    /// Create a builder with the default configuration and deep crawling
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
            deep: true,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = CrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = CrawlerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Follow relevant subpages (default) or stop at the seed page
    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Set the maximum number of subpages per seed
    pub fn with_max_subpages(mut self, max_subpages: usize) -> Self {
        self.config.max_subpages = max_subpages;
        self
    }

    /// Set the pause before each subpage request
    pub fn with_page_delay_ms(mut self, millis: u64) -> Self {
        self.config.page_delay_ms = millis;
        self
    }

    /// Set the pause between seeds
    pub fn with_seed_delay_ms(mut self, millis: u64) -> Self {
        self.config.seed_delay_ms = millis;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.request_timeout_secs = timeout_seconds;
        self
    }

    /// Build an HTTP crawler from the current settings
    pub fn build(self) -> Result<WebCrawler<HttpFetcher>> {
        WebCrawler::new(self.config.with_env_overrides())
    }

    /// Crawl a single seed URL
    pub async fn crawl(self, url: &str) -> Result<Option<CrawlRecord>> {
        let deep = self.deep;
        let crawler = self.build()?;
        Ok(crawler.crawl_seed(url, deep).await)
    }

    /// Crawl every seed URL in order
    pub async fn crawl_all<I, S>(self, urls: I) -> Result<Vec<CrawlRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let deep = self.deep;
        let crawler = self.build()?;
        Ok(crawler.crawl_all(urls, deep).await)
    }
}

/// Crawl one seed with the default configuration
pub async fn crawl_seed(url: &str, deep: bool) -> Result<Option<CrawlRecord>> {
    CareerCrawler::new().with_deep(deep).crawl(url).await
}

/// Crawl a list of seeds with the default configuration
pub async fn crawl_all<I, S>(urls: I, deep: bool) -> Result<Vec<CrawlRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    CareerCrawler::new().with_deep(deep).crawl_all(urls).await
}
