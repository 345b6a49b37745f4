pub mod fetcher;
pub mod web;

pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use web::WebCrawler;
