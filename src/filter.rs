use regex::Regex;
use url::Url;

/// Extensions that are never worth fetching: images, stylesheets, scripts,
/// fonts, archives, media and documents
const SKIP_EXTENSION_PATTERN: &str = r"(?i)\.(jpg|jpeg|png|gif|svg|webp|ico|bmp|css|js|woff|woff2|ttf|eot|pdf|doc|docx|xls|xlsx|ppt|pptx|zip|tar|gz|rar|7z|mp3|mp4|avi|mov|wmv|webm|ogg)$";

/// Href prefixes that are not crawlable pages at all
const NON_PAGE_PREFIXES: [&str; 4] = ["#", "javascript:", "mailto:", "tel:"];

/// Normalizes and filters candidate URLs for one crawl session
#[derive(Debug)]
pub struct UrlFilter {
    base: Url,
    skip_extensions: Regex,
}

impl UrlFilter {
    /// Create a filter scoped to the host of the given base URL
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url)?;
        let skip_extensions =
            Regex::new(SKIP_EXTENSION_PATTERN).expect("skip-extension pattern should be valid");
        Ok(Self {
            base,
            skip_extensions,
        })
    }

    /// The parsed base URL of the session
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve an href against the base and normalize it.
    ///
    /// Normalization keeps scheme, host and path only, with the trailing
    /// slash removed. Malformed input is returned unchanged rather than
    /// rejected; callers must tolerate the no-op.
    pub fn normalize(&self, href: &str) -> String {
        match self.base.join(href) {
            Ok(resolved) => normalize_url(&resolved),
            Err(_) => href.to_string(),
        }
    }

    /// Whether an already-resolved URL points at the session's host
    pub fn is_internal(&self, url: &Url) -> bool {
        url.host_str() == self.base.host_str()
    }

    /// Whether an href is a crawlable page reference at all
    /// (fragments, javascript:, mailto: and tel: are not)
    pub fn is_page_href(href: &str) -> bool {
        let trimmed = href.trim().to_ascii_lowercase();
        if trimmed.is_empty() {
            return false;
        }
        !NON_PAGE_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
    }

    /// Whether a URL matches the skip-extension list (assets, media, documents)
    pub fn is_skippable_asset(&self, url: &str) -> bool {
        self.skip_extensions.is_match(url)
    }
}

/// Normalize a parsed URL to `scheme://host[:port]` plus the path with any
/// trailing slash removed; query and fragment are dropped
pub fn normalize_url(url: &Url) -> String {
    let mut out = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(url.path().trim_end_matches('/'));
    out
}

/// Number of non-empty path segments in a normalized URL, used as the
/// depth input of the priority score
pub fn path_depth(url: &str) -> usize {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .count(),
        Err(_) => 0,
    }
}
