use crate::config::CrawlerConfig;
use crate::error::{Error, Result};
use crate::parsers::text;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

/// Elements that never carry readable text
const MEDIA_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "img", "picture", "video", "audio", "source",
    "track", "svg", "canvas", "object", "embed", "template",
];

/// Page chrome dropped when falling back to the whole body
const LAYOUT_TAGS: &[&str] = &["nav", "header", "footer", "aside"];
const LAYOUT_ROLES: &[&str] = &["navigation", "banner", "contentinfo"];

/// Elements that start a new line in the extracted text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section",
    "table", "tbody", "td", "th", "thead", "tr", "ul",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Inside a main-content candidate: media and overlays are skipped
    Content,
    /// Whole body: layout chrome is skipped as well
    Page,
}

/// Extracts clean body text from parsed pages
///
/// Elements are skipped while walking the tree, so the document itself is
/// never modified and repeated extraction yields the same text.
#[derive(Debug)]
pub struct TextExtractor {
    main_selectors: Vec<Selector>,
    noise_patterns: Vec<String>,
    min_main_chars: usize,
}

impl TextExtractor {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut main_selectors = Vec::with_capacity(config.main_content_selectors.len());
        for selector in &config.main_content_selectors {
            let parsed =
                Selector::parse(selector).map_err(|_| Error::Selector(selector.to_string()))?;
            main_selectors.push(parsed);
        }

        Ok(Self {
            main_selectors,
            noise_patterns: config
                .noise_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            min_main_chars: config.main_content_min_chars,
        })
    }

    /// Returns the cleaned, normalized text of a document
    ///
    /// The longest main-content candidate wins. When it is shorter than the
    /// configured minimum, the whole body without navigation, header,
    /// footer and aside is used instead.
    pub fn extract_text(&self, doc: &Html) -> String {
        let mut best = String::new();
        let mut best_len = 0;

        for selector in &self.main_selectors {
            let Some(element) = doc
                .select(selector)
                .find(|el| {
                    !self.is_excluded(el, Scope::Content) && !self.inside_excluded(el, Scope::Content)
                })
            else {
                continue;
            };

            let candidate = self.render(element, Scope::Content);
            let len = candidate.chars().count();
            if len > best_len {
                best = candidate;
                best_len = len;
            }
        }

        if best_len >= self.min_main_chars {
            ::log::debug!("Using main content ({} chars)", best_len);
            return best;
        }

        ::log::debug!(
            "Main content too short ({} < {} chars), using page body",
            best_len,
            self.min_main_chars
        );
        doc.select(&BODY)
            .next()
            .map(|body| self.render(body, Scope::Page))
            .unwrap_or_default()
    }

    fn render(&self, root: ElementRef<'_>, scope: Scope) -> String {
        let mut raw = String::new();
        self.collect_text(root, scope, &mut raw);
        text::normalize(&raw)
    }

    fn collect_text(&self, element: ElementRef<'_>, scope: Scope, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(t) => out.push_str(&text::collapse_inline(t)),
                Node::Element(_) => {
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if self.is_excluded(&child_el, scope) {
                        continue;
                    }

                    let name = child_el.value().name();
                    if name == "br" {
                        out.push('\n');
                        continue;
                    }

                    let block = BLOCK_TAGS.contains(&name);
                    if block {
                        out.push('\n');
                    }
                    self.collect_text(child_el, scope, out);
                    if block {
                        out.push('\n');
                    }
                }
                _ => {}
            }
        }
    }

    fn inside_excluded(&self, element: &ElementRef<'_>, scope: Scope) -> bool {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.is_excluded(&ancestor, scope))
    }

    fn is_excluded(&self, element: &ElementRef<'_>, scope: Scope) -> bool {
        let el = element.value();
        let name = el.name();

        // the document root is never dropped, even with a "modal-open" class
        if name == "html" || name == "body" {
            return false;
        }
        if MEDIA_TAGS.contains(&name) || self.is_noise(element) {
            return true;
        }
        if scope == Scope::Page {
            if LAYOUT_TAGS.contains(&name) {
                return true;
            }
            if let Some(role) = el.attr("role") {
                return LAYOUT_ROLES.contains(&role.trim().to_lowercase().as_str());
            }
        }
        false
    }

    /// Cookie banners, consent dialogs, popups and modals
    fn is_noise(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        [el.attr("class"), el.attr("id")]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .any(|value| self.noise_patterns.iter().any(|p| value.contains(p.as_str())))
    }
}
