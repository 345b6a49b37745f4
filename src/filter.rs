use crate::config::CrawlerConfig;
use crate::error::Result;
use regex::Regex;
use url::Url;

/// Decides which discovered links are worth fetching for a seed
///
/// A link is followed when it is an http(s) URL on exactly the seed's
/// host, does not point at a known non-HTML file, and contains at least
/// one relevance keyword.
#[derive(Debug)]
pub struct LinkFilter {
    keywords: Vec<String>,
    skip_regex: Option<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let extensions: Vec<String> = config
            .skip_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| regex::escape(&e))
            .collect();

        let skip_regex = if extensions.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\.({})$", extensions.join("|")))?)
        };

        Ok(Self {
            keywords: config
                .relevance_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            skip_regex,
        })
    }

    /// Determine if a resolved link should be crawled from `seed_url`
    pub fn should_crawl(&self, url: &Url, seed_url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if !self.is_same_host(url, seed_url) {
            return false;
        }

        if self.has_skipped_extension(url) {
            return false;
        }

        self.is_relevant(url)
    }

    /// Host names must match exactly; subdomains are other sites
    pub fn is_same_host(&self, url: &Url, seed_url: &Url) -> bool {
        match (url.host_str(), seed_url.host_str()) {
            (Some(host), Some(seed_host)) => host.eq_ignore_ascii_case(seed_host),
            _ => false,
        }
    }

    /// Check if the path ends in a non-HTML file extension
    pub fn has_skipped_extension(&self, url: &Url) -> bool {
        match &self.skip_regex {
            Some(regex) => regex.is_match(&url.path().to_lowercase()),
            None => false,
        }
    }

    /// Check if the full URL contains a relevance keyword
    pub fn is_relevant(&self, url: &Url) -> bool {
        let lowered = url.as_str().to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}
