use thiserror::Error;

/// Errors raised while setting up a crawler.
///
/// Page-level failures are never reported through this type: a page that
/// cannot be fetched is logged and dropped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
