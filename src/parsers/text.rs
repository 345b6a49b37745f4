use regex::Regex;
use std::sync::LazyLock;

static TABS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").expect("valid pattern"));
static SPACED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").expect("valid pattern"));
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid pattern"));
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s.,;:!?'"‘’“”…()\[\]/&@#%+*=$€£–—-]"#).expect("valid pattern")
});

/// Normalizes extracted page text
///
/// - Tabs become a single space
/// - Spaces around line breaks are dropped
/// - Three or more line breaks become exactly two
/// - Runs of spaces become a single space
/// - Characters outside the word/punctuation whitelist are removed
/// - Leading and trailing whitespace is trimmed
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = strip_unsafe_chars(&text);
    let text = TABS.replace_all(&text, " ");
    let text = collapse_spaces(&text);
    let text = SPACED_NEWLINE.replace_all(&text, "\n");
    let text = collapse_blank_lines(&text);

    text.trim().to_string()
}

/// Removes characters outside the safe whitelist
pub fn strip_unsafe_chars(text: &str) -> String {
    UNSAFE_CHARS.replace_all(text, "").into_owned()
}

/// Reduces runs of three or more newlines to a paragraph break
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUNS.replace_all(text, "\n\n").into_owned()
}

/// Reduces runs of spaces to one space
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

/// Collapses every whitespace run in a text node to a single space
///
/// A leading or trailing run is kept as one space so adjacent inline
/// nodes do not run together.
pub fn collapse_inline(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return if text.is_empty() {
            String::new()
        } else {
            " ".to_string()
        };
    }

    let mut out = String::with_capacity(text.len());
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words.join(" "));
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

/// Truncates to at most `max_chars` characters on a character boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
