use crate::config::CrawlerConfig;
use crate::crawlers::fetcher::{HttpFetcher, PageFetcher};
use crate::error::Result;
use crate::parsers::{LinkDiscoverer, TextExtractor, identity};
use crate::results::{CrawlRecord, SubPageRecord};
use chrono::Utc;
use scraper::Html;

/// What the crawl keeps from a seed page before its subpages are fetched
struct SeedPage {
    name: String,
    description: String,
    content: String,
    links: Vec<String>,
}

/// Polite, single-origin crawler for company career pages
///
/// Every request is made in sequence: subpages of a seed one after the
/// other with `page_delay` between them, and seeds of a batch one after
/// the other with `seed_delay` between them.
pub struct WebCrawler<F = HttpFetcher> {
    config: CrawlerConfig,
    fetcher: F,
    extractor: TextExtractor,
    discoverer: LinkDiscoverer,
}

impl WebCrawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> WebCrawler<F> {
    /// Creates a crawler on top of any page source
    pub fn with_fetcher(config: CrawlerConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        let extractor = TextExtractor::new(&config)?;
        let discoverer = LinkDiscoverer::new(&config)?;

        Ok(Self {
            config,
            fetcher,
            extractor,
            discoverer,
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls one seed URL and, when `deep` is set, its relevant subpages
    ///
    /// Returns `None` only when the seed page itself cannot be fetched.
    /// Subpages that fail are left out of the record.
    pub async fn crawl_seed(&self, url: &str, deep: bool) -> Option<CrawlRecord> {
        ::log::info!("Crawling seed: {} (deep: {})", url, deep);
        let start = std::time::Instant::now();

        let Some(doc) = self.fetcher.fetch(url).await else {
            ::log::error!("Failed to fetch seed page, skipping: {}", url);
            return None;
        };
        let seed = self.read_seed(url, &doc, deep);
        drop(doc);

        let mut sub_pages = Vec::with_capacity(seed.links.len());
        for link in &seed.links {
            tokio::time::sleep(self.config.page_delay()).await;

            match self.fetcher.fetch(link).await {
                Some(page) => sub_pages.push(self.read_subpage(link, &page)),
                None => ::log::warn!("Dropping subpage that failed to load: {}", link),
            }
        }

        let record = CrawlRecord::new(
            seed.name,
            url.to_string(),
            seed.description,
            seed.content,
            sub_pages,
            Utc::now(),
        );

        ::log::info!(
            "Crawled {} ({}): {} pages, {} characters in {:.2} seconds",
            record.name,
            url,
            record.total_pages,
            record.total_characters,
            start.elapsed().as_secs_f64()
        );
        Some(record)
    }

    /// Crawls every seed in order, keeping only the seeds that succeeded
    pub async fn crawl_all<I, S>(&self, urls: I, deep: bool) -> Vec<CrawlRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<S> = urls.into_iter().collect();
        let mut records = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.seed_delay()).await;
            }

            if let Some(record) = self.crawl_seed(url.as_ref(), deep).await {
                records.push(record);
            }
        }

        ::log::info!(
            "Batch complete: {} of {} seeds crawled",
            records.len(),
            urls.len()
        );
        records
    }

    fn read_seed(&self, url: &str, doc: &Html, deep: bool) -> SeedPage {
        let links = if deep {
            self.discoverer.discover(doc, url)
        } else {
            Vec::new()
        };

        SeedPage {
            name: identity::resolve_name(url, doc),
            description: identity::meta_description(doc, self.config.description_max_chars),
            content: self.extractor.extract_text(doc),
            links,
        }
    }

    fn read_subpage(&self, url: &str, doc: &Html) -> SubPageRecord {
        SubPageRecord::new(
            url.to_string(),
            identity::page_title(doc),
            self.extractor.extract_text(doc),
        )
    }
}
