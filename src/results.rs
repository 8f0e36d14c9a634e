use serde::{Deserialize, Serialize};

/// A single link discovered on a crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Normalized absolute URL the anchor points at
    pub href: String,

    /// Visible anchor text (whitespace-collapsed, may be empty)
    pub anchor_text: String,

    /// Whether the anchor sits inside a navigation landmark
    pub is_nav: bool,

    /// Whether the anchor sits inside a footer landmark
    pub is_footer: bool,
}

/// Heading text per level, in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// Represents one fetched and parsed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Normalized URL of the page (unique within a crawl session)
    pub url: String,

    /// HTTP status code of the response
    pub status_code: u16,

    /// Depth at which the page was discovered (start URL is 0)
    pub depth: usize,

    /// Page title (if present)
    pub title: Option<String>,

    /// First h1 on the page (if present)
    pub h1: Option<String>,

    /// Meta description (if present)
    pub meta_description: Option<String>,

    /// Canonical link href (if present)
    pub canonical: Option<String>,

    /// Declared document language (if present)
    pub lang: Option<String>,

    /// All h1/h2/h3 headings in document order
    pub headings: Headings,

    /// Main content text, whitespace-collapsed and capped at 50k characters
    pub cleaned_text: String,

    /// Whitespace-split token count of `cleaned_text`
    pub word_count: usize,

    /// Sha256 hex digest of `cleaned_text`, for duplicate-content detection
    pub text_hash: String,

    /// Same-host links with nav/footer provenance
    pub internal_links: Vec<PageLink>,

    /// Absolute links pointing at other hosts
    pub external_links: Vec<String>,

    /// Parsed ld+json blocks (malformed blocks are dropped)
    pub structured_data: Vec<serde_json::Value>,
}

/// Progress counters for a running crawl session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CrawlStats {
    /// URLs taken off the frontier so far (fetched or skipped)
    pub visited: usize,

    /// URLs currently waiting on the frontier
    pub queued: usize,
}
