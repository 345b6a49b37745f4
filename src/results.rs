use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\n--- PAGE: (.*?) \((\S*)\) ---\n\n").expect("page marker pattern is valid")
});

/// One successfully fetched subpage of a seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPageRecord {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl SubPageRecord {
    pub fn new(url: String, title: String, content: String) -> Self {
        Self {
            url,
            title,
            content,
        }
    }

    /// Block appended to the combined content for this page
    pub fn section(&self) -> String {
        format!(
            "\n\n--- PAGE: {} ({}) ---\n\n{}",
            self.title, self.url, self.content
        )
    }
}

/// Aggregate result of crawling one seed URL
///
/// Built once through [`CrawlRecord::new`], which derives the combined
/// content and both counters from the pages it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRecord {
    pub name: String,
    /// The seed URL exactly as given
    pub url: String,
    pub description: String,
    pub main_page_content: String,
    pub all_content: String,
    pub sub_pages: Vec<SubPageRecord>,
    /// Length of `all_content` in characters
    pub total_characters: usize,
    /// Subpages plus the seed page
    pub total_pages: usize,
    pub scraped_at: DateTime<Utc>,
}

impl CrawlRecord {
    pub fn new(
        name: String,
        url: String,
        description: String,
        main_page_content: String,
        sub_pages: Vec<SubPageRecord>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        let mut all_content = main_page_content.clone();
        for page in &sub_pages {
            all_content.push_str(&page.section());
        }

        let total_characters = all_content.chars().count();
        let total_pages = sub_pages.len() + 1;

        Self {
            name,
            url,
            description,
            main_page_content,
            all_content,
            sub_pages,
            total_characters,
            total_pages,
            scraped_at,
        }
    }

    /// Split `all_content` back into the seed text and its subpages
    pub fn sections(&self) -> (String, Vec<SubPageRecord>) {
        split_sections(&self.all_content)
    }
}

/// Split combined crawl content on its page markers
///
/// Returns the text before the first marker and one record per marker,
/// in order.
pub fn split_sections(all_content: &str) -> (String, Vec<SubPageRecord>) {
    let mut markers = PAGE_MARKER.captures_iter(all_content).peekable();

    let main_end = match markers.peek() {
        Some(caps) => caps.get(0).map_or(all_content.len(), |m| m.start()),
        None => return (all_content.to_string(), Vec::new()),
    };
    let main = all_content[..main_end].to_string();

    let mut pages = Vec::new();
    while let Some(caps) = markers.next() {
        let (Some(whole), Some(title), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let content_end = markers
            .peek()
            .and_then(|next| next.get(0))
            .map_or(all_content.len(), |m| m.start());

        pages.push(SubPageRecord::new(
            url.as_str().to_string(),
            title.as_str().to_string(),
            all_content[whole.end()..content_end].to_string(),
        ));
    }

    (main, pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, title: &str, content: &str) -> SubPageRecord {
        SubPageRecord::new(url.to_string(), title.to_string(), content.to_string())
    }

    fn record(main: &str, pages: Vec<SubPageRecord>) -> CrawlRecord {
        CrawlRecord::new(
            "Acme".to_string(),
            "https://acme.test/careers".to_string(),
            String::new(),
            main.to_string(),
            pages,
            Utc::now(),
        )
    }

    #[test]
    fn test_seed_only_record() {
        let rec = record("Welcome to Acme", Vec::new());
        assert_eq!(rec.all_content, "Welcome to Acme");
        assert_eq!(rec.total_pages, 1);
        assert_eq!(rec.total_characters, 15);
    }

    #[test]
    fn test_counters_follow_content() {
        let rec = record(
            "Main text",
            vec![
                page("https://acme.test/team", "Team", "Our team"),
                page("https://acme.test/about", "About", "About us"),
            ],
        );
        assert_eq!(rec.total_pages, rec.sub_pages.len() + 1);
        assert_eq!(rec.total_characters, rec.all_content.chars().count());
        assert!(rec.all_content.starts_with("Main text"));
        assert!(
            rec.all_content
                .ends_with("\n\n--- PAGE: About (https://acme.test/about) ---\n\nAbout us")
        );
    }

    #[test]
    fn test_character_count_is_not_byte_count() {
        let rec = record("Zürich café", Vec::new());
        assert_eq!(rec.total_characters, 11);
        assert!(rec.all_content.len() > 11);
    }

    #[test]
    fn test_sections_reconstruct_subpages() {
        let pages = vec![
            page("https://acme.test/jobs", "Open Roles (2024)", "Engineer\n\nDesigner"),
            page("https://acme.test/benefits", "Benefits", "Health, dental"),
        ];
        let rec = record("Join us", pages.clone());

        let (main, parsed) = rec.sections();
        assert_eq!(main, "Join us");
        assert_eq!(parsed, pages);
    }

    #[test]
    fn test_sections_with_parentheses_in_url() {
        let pages = vec![
            page("https://acme.test/jobs/(engineering)", "Eng", "Backend"),
            page("https://acme.test/about", "About (us)", "Since 1999"),
        ];
        let rec = record("Main", pages.clone());

        let (main, parsed) = rec.sections();
        assert_eq!(main, "Main");
        assert_eq!(parsed, pages);
    }

    #[test]
    fn test_sections_without_markers() {
        let (main, parsed) = split_sections("just text");
        assert_eq!(main, "just text");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let rec = record("Main", vec![page("https://acme.test/team", "Team", "x")]);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["mainPageContent"], "Main");
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["subPages"][0]["title"], "Team");
        assert!(json["scrapedAt"].is_string());
    }
}
