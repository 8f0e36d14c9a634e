pub mod html;

#[cfg(test)]
mod tests;

use sha2::{Digest, Sha256};

use crate::results::{Headings, PageLink};

/// Hard cap on extracted main-content text, in characters. Content beyond
/// this is dropped before word counting and hashing.
pub const MAX_TEXT_CHARS: usize = 50_000;

/// Everything extracted from one HTML document.
///
/// The crawl loop combines this with the URL, status code and depth to
/// build a `CrawlResult`.
#[derive(Debug, Default)]
pub struct PageContent {
    pub title: Option<String>,
    pub h1: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub lang: Option<String>,
    pub headings: Headings,
    pub cleaned_text: String,
    pub word_count: usize,
    pub text_hash: String,
    pub internal_links: Vec<PageLink>,
    pub external_links: Vec<String>,
    pub structured_data: Vec<serde_json::Value>,
}

/// Collapse all runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Sha256 hex digest of a text block
pub fn text_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
