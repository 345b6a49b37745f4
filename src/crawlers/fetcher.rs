use crate::config::CrawlerConfig;
use crate::error::Result;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, redirect};
use scraper::Html;
use thiserror::Error;

/// Why a single page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("HTTP status {0}")]
    Status(StatusCode),

    #[error("failed to read body: {0}")]
    Body(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e)
        }
    }
}

/// Source of parsed pages for the crawl orchestrators
///
/// Implementations report every failure as `None`; nothing is raised to
/// the caller.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Option<Html>;
}

/// Fetches pages over HTTP with browser-like headers
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout())
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Downloads the body of `url`, treating any non-2xx status as failure
    pub async fn fetch_body(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        ::log::debug!("HTTP {} for {}", status.as_u16(), url);
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e)
            }
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<Html> {
        ::log::info!("Fetching: {}", url);
        let start = std::time::Instant::now();

        match self.fetch_body(url).await {
            Ok(body) => {
                ::log::debug!(
                    "Fetched {} ({} bytes) in {:.2} seconds",
                    url,
                    body.len(),
                    start.elapsed().as_secs_f64()
                );
                Some(Html::parse_document(&body))
            }
            Err(e) => {
                ::log::warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }
}
