//! Page identity: site name, page title and meta description.

use crate::parsers::text;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static OG_SITE_NAME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:site_name"]"#).expect("og:site_name selector is valid")
});
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));
static H1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("h1 selector is valid"));
static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("description selector is valid")
});
static OG_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:description"]"#).expect("og:description selector is valid")
});

/// Separators between the page and site parts of a `<title>`
const NAME_SEPARATORS: &[char] = &['|', '-', '–', '—', ':'];
const PAGE_TITLE_SEPARATORS: &[char] = &['|', '-', '–'];

const UNKNOWN_NAME: &str = "Unknown";
const UNTITLED: &str = "Untitled";

/// Resolves a human-readable company name for a page
///
/// Tries, in order: `og:site_name`, the `<title>` text, the host name
/// of `url`. Falls back to `"Unknown"` when `url` cannot be parsed.
pub fn resolve_name(url: &str, doc: &Html) -> String {
    if let Some(name) = site_name(doc) {
        return name;
    }
    if let Some(name) = title_text(doc).as_deref().and_then(name_from_title) {
        return name;
    }
    name_from_host(url).unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn site_name(doc: &Html) -> Option<String> {
    let content = meta_content(doc, &OG_SITE_NAME)?;
    let len = content.chars().count();
    (len > 2 && len < 50).then_some(content)
}

/// Picks the site part of a title such as `"Careers | Acme Corp"`
pub fn name_from_title(title: &str) -> Option<String> {
    let segments: Vec<&str> = title.split(NAME_SEPARATORS).map(str::trim).collect();

    if segments.len() > 1 {
        if let Some(last) = segments.last().filter(|s| is_plausible_name(s)) {
            return Some(last.to_string());
        }
    }

    segments
        .first()
        .filter(|s| is_plausible_name(s))
        .map(|s| s.to_string())
}

fn is_plausible_name(segment: &str) -> bool {
    let len = segment.chars().count();
    (2..=40).contains(&len) && !segment.to_lowercase().contains("career")
}

/// `https://www.acme.com/jobs` becomes `"Acme"`
pub fn name_from_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().filter(|l| !l.is_empty())?;
    Some(capitalize(label))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title of a subpage: the first `<title>` segment, else the first `<h1>`
pub fn page_title(doc: &Html) -> String {
    let from_title = title_text(doc).and_then(|title| {
        title
            .split(PAGE_TITLE_SEPARATORS)
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    });
    if let Some(title) = from_title {
        return title;
    }

    doc.select(&H1)
        .next()
        .map(|h1| squash(&h1.text().collect::<String>()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Meta description (`name="description"`, then `og:description`),
/// cut to `max_chars`
pub fn meta_description(doc: &Html, max_chars: usize) -> String {
    meta_content(doc, &META_DESCRIPTION)
        .or_else(|| meta_content(doc, &OG_DESCRIPTION))
        .map(|d| text::truncate_chars(&d, max_chars))
        .unwrap_or_default()
}

fn title_text(doc: &Html) -> Option<String> {
    doc.select(&TITLE)
        .next()
        .map(|t| squash(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(squash)
        .find(|c| !c.is_empty())
}

fn squash(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
