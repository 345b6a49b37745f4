use crate::config::CrawlerConfig;
use crate::parsers::html::TextExtractor;
use scraper::Html;

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TextExtractor {
        TextExtractor::new(&CrawlerConfig::default()).unwrap()
    }

    /// Paragraphs adding up to well over the main-content threshold
    fn long_paragraphs() -> Vec<String> {
        (1..=10)
            .map(|i| {
                format!(
                    "Paragraph {} describes how our engineering teams work, what we value, \
                     and the kind of problems new hires solve in their first year with us.",
                    i
                )
            })
            .collect()
    }

    #[test]
    fn test_main_content_excludes_chrome() {
        let paragraphs = long_paragraphs();
        let main_html: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();
        let html = format!(
            r#"<html><body>
                <nav><a href="/">Home</a><a href="/jobs">Jobs</a></nav>
                <div class="cookie-banner">We use cookies to improve your experience.</div>
                <main>{}</main>
                <footer>Copyright Acme Corp</footer>
            </body></html>"#,
            main_html
        );
        let doc = Html::parse_document(&html);

        let text = extractor().extract_text(&doc);
        let expected = paragraphs.join("\n\n");
        assert!(expected.chars().count() > 1000);
        assert_eq!(text, expected);
        assert!(!text.contains("Home"));
        assert!(!text.contains("cookies"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_short_main_falls_back_to_body() {
        let html = r#"<html><body>
            <header>Acme header</header>
            <nav>Menu</nav>
            <main><p>Short intro.</p></main>
            <section><p>We are hiring engineers.</p></section>
            <aside>Related links</aside>
            <div role="contentinfo">Legal</div>
            <footer>Footer text</footer>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let text = extractor().extract_text(&doc);
        assert_eq!(text, "Short intro.\n\nWe are hiring engineers.");
    }

    #[test]
    fn test_longest_candidate_wins() {
        let paragraphs = long_paragraphs();
        let article: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();
        let html = format!(
            r#"<html><body><main><p>Tiny main.</p></main><article>{}</article></body></html>"#,
            article
        );
        let doc = Html::parse_document(&html);

        let text = extractor().extract_text(&doc);
        assert!(text.starts_with("Paragraph 1 "));
        assert!(!text.contains("Tiny main."));
    }

    #[test]
    fn test_scripts_styles_and_modals_removed() {
        let html = r#"<html><head><style>body { color: red; }</style></head><body>
            <script>var tracking = true;</script>
            <noscript>Enable JavaScript</noscript>
            <div id="newsletter-popup">Subscribe!</div>
            <div class="Modal-Overlay">Sign in</div>
            <div id="consent">Accept all</div>
            <p>Build the future <b>with</b> us.</p>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let text = extractor().extract_text(&doc);
        assert_eq!(text, "Build the future with us.");
    }

    #[test]
    fn test_noisy_candidate_moves_to_next_match() {
        let config = CrawlerConfig {
            main_content_selectors: vec![".content".to_string()],
            main_content_min_chars: 5,
            ..CrawlerConfig::default()
        };
        let extractor = TextExtractor::new(&config).unwrap();
        let html = r#"<html><body>
            <div class="content cookie-notice"><p>We use cookies everywhere.</p></div>
            <div class="content"><p>Open roles in Berlin</p></div>
            <p>Outside any content block</p>
        </body></html>"#;
        let doc = Html::parse_document(html);

        assert_eq!(extractor.extract_text(&doc), "Open roles in Berlin");
    }

    #[test]
    fn test_body_class_is_not_noise() {
        let html = r#"<html><body class="modal-open"><p>Visible text</p></body></html>"#;
        let doc = Html::parse_document(html);

        assert_eq!(extractor().extract_text(&doc), "Visible text");
    }

    #[test]
    fn test_line_breaks_and_lists() {
        let html = r#"<html><body>
            <h2>Benefits</h2>
            <ul><li>Health</li><li>Equity</li></ul>
            <p>Line one<br>Line two</p>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let text = extractor().extract_text(&doc);
        assert_eq!(text, "Benefits\n\nHealth\n\nEquity\n\nLine one\nLine two");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<html><body><nav>Menu</nav><main><p>Same every time.</p></main>
            <div class="cookie">Cookies</div></body></html>"#;
        let doc = Html::parse_document(html);
        let extractor = extractor();

        let first = extractor.extract_text(&doc);
        let second = extractor.extract_text(&doc);
        assert_eq!(first, second);
        assert_eq!(first, "Same every time.");
    }

    #[test]
    fn test_configurable_threshold() {
        let config = CrawlerConfig {
            main_content_min_chars: 5,
            ..CrawlerConfig::default()
        };
        let extractor = TextExtractor::new(&config).unwrap();
        let html = r#"<html><body><p>Outside</p><main><p>Inside main</p></main></body></html>"#;
        let doc = Html::parse_document(html);

        assert_eq!(extractor.extract_text(&doc), "Inside main");
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = CrawlerConfig {
            main_content_selectors: vec!["main[".to_string()],
            ..CrawlerConfig::default()
        };
        assert!(TextExtractor::new(&config).is_err());
    }
}
