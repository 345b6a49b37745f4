use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides the configured User-Agent
pub const USER_AGENT_ENV: &str = "CRAWL_USER_AGENT";

/// Desktop browser User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Substrings that mark a link as worth following
pub const RELEVANCE_KEYWORDS: &[&str] = &[
    // careers and hiring
    "career",
    "job",
    "hiring",
    "join",
    "work-with-us",
    "opportunit",
    "vacanc",
    "position",
    "opening",
    "recruit",
    // programs
    "graduate",
    "intern",
    "entry-level",
    "early-career",
    "apprentice",
    "student",
    "university",
    "campus",
    // teams and functions
    "team",
    "engineering",
    "product",
    "data",
    "design",
    "research",
    // culture
    "about",
    "values",
    "culture",
    "benefits",
    "perks",
    "diversity",
    "inclusion",
    "mission",
    "people",
    "life-at",
    // locations
    "location",
    "office",
    "remote",
];

/// Main-content selectors, probed in priority order
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    ".main-content",
    "#main-content",
    ".content",
    "#content",
    ".page-content",
    ".careers",
    "#careers",
    ".jobs",
    "#jobs",
];

/// Class/id fragments that mark banners and overlays
pub const NOISE_PATTERNS: &[&str] = &["cookie", "consent", "popup", "modal"];

/// Extensions of linked resources that are never HTML pages
pub const SKIP_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "jpg", "jpeg", "png", "gif", "svg", "webp", "mp3", "wav", "mp4", "avi",
    "mov", "zip",
];

/// Configuration for the career-page crawler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Hard timeout for a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause before each subpage request
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Pause between two seed crawls in a batch
    #[serde(default = "default_seed_delay_ms")]
    pub seed_delay_ms: u64,

    /// Maximum number of subpages followed from one seed
    #[serde(default = "default_max_subpages")]
    pub max_subpages: usize,

    /// Below this many characters the main-content probe is discarded
    /// in favour of the whole body
    #[serde(default = "default_main_content_min_chars")]
    pub main_content_min_chars: usize,

    /// Meta descriptions are cut to this many characters
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,

    /// User-Agent header for every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Keywords a link must contain to be followed
    #[serde(default = "default_relevance_keywords")]
    pub relevance_keywords: Vec<String>,

    /// CSS selectors for the main content area, highest priority first
    #[serde(default = "default_main_content_selectors")]
    pub main_content_selectors: Vec<String>,

    /// Class/id fragments of elements dropped before text extraction
    #[serde(default = "default_noise_patterns")]
    pub noise_patterns: Vec<String>,

    /// File extensions excluded from link discovery
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_seed_delay_ms() -> u64 {
    1500
}

fn default_max_subpages() -> usize {
    15
}

fn default_main_content_min_chars() -> usize {
    1000
}

fn default_description_max_chars() -> usize {
    1000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_relevance_keywords() -> Vec<String> {
    to_strings(RELEVANCE_KEYWORDS)
}

fn default_main_content_selectors() -> Vec<String> {
    to_strings(MAIN_CONTENT_SELECTORS)
}

fn default_noise_patterns() -> Vec<String> {
    to_strings(NOISE_PATTERNS)
}

fn default_skip_extensions() -> Vec<String> {
    to_strings(SKIP_EXTENSIONS)
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            page_delay_ms: default_page_delay_ms(),
            seed_delay_ms: default_seed_delay_ms(),
            max_subpages: default_max_subpages(),
            main_content_min_chars: default_main_content_min_chars(),
            description_max_chars: default_description_max_chars(),
            user_agent: default_user_agent(),
            relevance_keywords: default_relevance_keywords(),
            main_content_selectors: default_main_content_selectors(),
            noise_patterns: default_noise_patterns(),
            skip_extensions: default_skip_extensions(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the `CRAWL_USER_AGENT` override if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(user_agent) = std::env::var(USER_AGENT_ENV) {
            if !user_agent.trim().is_empty() {
                ::log::debug!("Using User-Agent from {}", USER_AGENT_ENV);
                self.user_agent = user_agent;
            }
        }
        self
    }

    /// Reject settings the crawler cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::InvalidConfig("user_agent must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn seed_delay(&self) -> Duration {
        Duration::from_millis(self.seed_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = CrawlerConfig::from_json("{}").unwrap();
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.page_delay_ms, 500);
        assert_eq!(config.seed_delay_ms, 1500);
        assert_eq!(config.max_subpages, 15);
        assert_eq!(config.main_content_min_chars, 1000);
        assert_eq!(config.relevance_keywords.len(), RELEVANCE_KEYWORDS.len());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_partial_override() {
        let config =
            CrawlerConfig::from_json(r#"{"max_subpages": 3, "relevance_keywords": ["jobs"]}"#)
                .unwrap();
        assert_eq!(config.max_subpages, 3);
        assert_eq!(config.relevance_keywords, vec!["jobs".to_string()]);
        assert_eq!(config.page_delay_ms, 500);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = CrawlerConfig::from_json(r#"{"request_timeout_secs": 0}"#);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = CrawlerConfig::from_json("{ not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    fn temp_config_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("career-crawl-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_from_file() {
        let path = temp_config_path("from-file");
        std::fs::write(&path, r#"{"max_subpages": 4, "page_delay_ms": 10}"#).unwrap();

        let config = CrawlerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.max_subpages, 4);
        assert_eq!(config.page_delay_ms, 10);
        assert_eq!(config.seed_delay_ms, 1500);
    }

    #[test]
    fn test_from_file_missing() {
        let result = CrawlerConfig::from_file(temp_config_path("does-not-exist"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_from_file_validates() {
        let path = temp_config_path("invalid");
        std::fs::write(&path, r#"{"user_agent": "  "}"#).unwrap();

        let result = CrawlerConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    // Only this test touches CRAWL_USER_AGENT, so its steps run in sequence
    #[test]
    fn test_user_agent_env_override() {
        unsafe { std::env::set_var(USER_AGENT_ENV, "career-crawl-test/1.0") };
        let config = CrawlerConfig::default().with_env_overrides();
        assert_eq!(config.user_agent, "career-crawl-test/1.0");

        unsafe { std::env::set_var(USER_AGENT_ENV, "") };
        let config = CrawlerConfig::default().with_env_overrides();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);

        unsafe { std::env::set_var(USER_AGENT_ENV, "   ") };
        let config = CrawlerConfig::default().with_env_overrides();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);

        unsafe { std::env::remove_var(USER_AGENT_ENV) };
        let config = CrawlerConfig::default().with_env_overrides();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_durations() {
        let config = CrawlerConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.page_delay(), Duration::from_millis(500));
        assert_eq!(config.seed_delay(), Duration::from_millis(1500));
    }
}
