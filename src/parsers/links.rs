use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::filter::LinkFilter;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

const IGNORED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Finds career-relevant subpages linked from a seed page
#[derive(Debug)]
pub struct LinkDiscoverer {
    filter: LinkFilter,
    max_links: usize,
}

impl LinkDiscoverer {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            filter: LinkFilter::new(config)?,
            max_links: config.max_subpages,
        })
    }

    /// Returns relevant same-host links in document order
    ///
    /// Links are resolved against `seed_url`, deduplicated by exact string
    /// and never include the seed itself. The list is cut at the configured
    /// maximum, so earlier anchors (often the navigation menu) win.
    pub fn discover(&self, doc: &Html, seed_url: &str) -> Vec<String> {
        let Ok(base) = Url::parse(seed_url) else {
            ::log::warn!("Cannot discover links, invalid seed URL: {}", seed_url);
            return Vec::new();
        };

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(seed_url.to_string());
        seen.insert(base.as_str().to_string());

        let mut links = Vec::new();
        for href in doc.select(&ANCHORS).filter_map(|a| a.value().attr("href")) {
            if links.len() >= self.max_links {
                break;
            }
            if !is_followable_href(href) {
                continue;
            }

            let resolved = match base.join(href.trim()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    ::log::debug!("Skipping malformed link {:?}: {}", href, e);
                    continue;
                }
            };

            if !self.filter.should_crawl(&resolved, &base) {
                ::log::trace!("Link filter rejected: {}", resolved);
                continue;
            }

            let link = resolved.to_string();
            if seen.insert(link.clone()) {
                ::log::debug!("Discovered subpage: {}", link);
                links.push(link);
            }
        }

        ::log::info!("Found {} relevant links on {}", links.len(), seed_url);
        links
    }
}

/// Fragment-only anchors and non-HTTP actions are never followed
pub fn is_followable_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lowered = href.to_lowercase();
    !IGNORED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme))
}
