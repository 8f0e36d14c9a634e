use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::filter::{UrlFilter, normalize_url};
use crate::parsers::{
    MAX_TEXT_CHARS, PageContent, collapse_whitespace, text_fingerprint, truncate_chars,
};
use crate::results::{Headings, PageLink};

/// Subtrees excluded from main-content text extraction
const EXCLUDED_TAGS: [&str; 7] = [
    "script", "style", "nav", "footer", "header", "aside", "noscript",
];

/// Class/id markers that flag a subtree as chrome rather than content
const CHROME_MARKERS: [&str; 3] = ["sidebar", "menu", "navigation"];

/// Parse a fetched HTML document into its extracted content.
///
/// `page_url` is the URL the document was fetched from (relative links
/// resolve against it); `filter` decides internal vs external and
/// normalizes internal hrefs.
pub fn parse(html: &str, page_url: &Url, filter: &UrlFilter) -> PageContent {
    let doc = Html::parse_document(html);

    let title = first_text(&doc, "title");
    let h1 = first_text(&doc, "h1");
    let meta_description = first_attr(&doc, r#"meta[name="description"]"#, "content");
    let canonical = first_attr(&doc, r#"link[rel="canonical"]"#, "href");
    let lang = first_attr(&doc, "html", "lang");

    let headings = Headings {
        h1: all_text(&doc, "h1"),
        h2: all_text(&doc, "h2"),
        h3: all_text(&doc, "h3"),
    };

    let cleaned_text = extract_main_text(&doc);
    let cleaned_text = truncate_chars(&cleaned_text, MAX_TEXT_CHARS).to_string();
    let word_count = cleaned_text.split_whitespace().count();
    let text_hash = text_fingerprint(&cleaned_text);

    let (internal_links, external_links) = extract_links(&doc, page_url, filter);
    let structured_data = extract_structured_data(&doc);

    PageContent {
        title,
        h1,
        meta_description,
        canonical,
        lang,
        headings,
        cleaned_text,
        word_count,
        text_hash,
        internal_links,
        external_links,
        structured_data,
    }
}

/// Collapsed text of the first element matching the selector, or None when
/// the element is missing or empty
fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("selector should be valid");
    let element = doc.select(&selector).next()?;
    let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
    if text.is_empty() { None } else { Some(text) }
}

/// Trimmed attribute of the first element matching the selector
fn first_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("selector should be valid");
    let value = doc.select(&selector).next()?.value().attr(attr)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Collapsed text of every element matching the selector, in document order
fn all_text(doc: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("selector should be valid");
    doc.select(&selector)
        .map(|element| collapse_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Whitespace-collapsed body text with scripts, styles and page chrome
/// (nav/footer/header/aside and sidebar/menu/navigation subtrees) removed
fn extract_main_text(doc: &Html) -> String {
    let body_selector = Selector::parse("body").expect("selector should be valid");
    let Some(body) = doc.select(&body_selector).next() else {
        return String::new();
    };

    let mut raw = String::new();
    collect_text(body, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(' ');
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_excluded_subtree(&child_element) {
                collect_text(child_element, out);
            }
        }
    }
}

fn is_excluded_subtree(element: &ElementRef) -> bool {
    let value = element.value();
    EXCLUDED_TAGS.contains(&value.name()) || has_marker(value, &CHROME_MARKERS)
}

/// Whether the element carries any of the markers in its class or id
fn has_marker(element: &Element, markers: &[&str]) -> bool {
    let class = element.attr("class").unwrap_or_default().to_ascii_lowercase();
    let id = element.attr("id").unwrap_or_default().to_ascii_lowercase();
    markers
        .iter()
        .any(|marker| class.contains(marker) || id.contains(marker))
}

/// Split anchors into internal links (same host, normalized, with
/// nav/footer provenance) and external links (other hosts, absolute).
/// Fragment-only, javascript:, mailto: and tel: anchors are dropped, as is
/// any href that fails to resolve.
fn extract_links(
    doc: &Html,
    page_url: &Url,
    filter: &UrlFilter,
) -> (Vec<PageLink>, Vec<String>) {
    let anchor_selector = Selector::parse("a[href]").expect("selector should be valid");

    let mut internal = Vec::new();
    let mut external = Vec::new();
    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !UrlFilter::is_page_href(href) {
            continue;
        }
        let Ok(resolved) = page_url.join(href) else {
            ::log::debug!("Dropping unresolvable href {:?} on {}", href, page_url);
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        if filter.is_internal(&resolved) {
            internal.push(PageLink {
                href: normalize_url(&resolved),
                anchor_text: collapse_whitespace(&anchor.text().collect::<Vec<_>>().join(" ")),
                is_nav: in_nav_landmark(&anchor),
                is_footer: in_footer_landmark(&anchor),
            });
        } else {
            external.push(resolved.to_string());
        }
    }

    (internal, external)
}

fn ancestors_and_self<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    std::iter::once(*element).chain(element.ancestors().filter_map(ElementRef::wrap))
}

fn in_nav_landmark(element: &ElementRef) -> bool {
    ancestors_and_self(element).any(|ancestor| {
        let value = ancestor.value();
        value.name() == "nav"
            || value.name() == "header"
            || value.attr("role") == Some("navigation")
            || has_marker(value, &["nav", "menu"])
    })
}

fn in_footer_landmark(element: &ElementRef) -> bool {
    ancestors_and_self(element).any(|ancestor| {
        let value = ancestor.value();
        value.name() == "footer" || has_marker(value, &["footer"])
    })
}

/// Parse every ld+json block, dropping any that is not valid JSON
fn extract_structured_data(doc: &Html) -> Vec<serde_json::Value> {
    let selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).expect("selector should be valid");
    doc.select(&selector)
        .filter_map(|block| {
            let raw = block.text().collect::<String>();
            match serde_json::from_str(raw.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    ::log::debug!("Dropping malformed ld+json block: {}", e);
                    None
                }
            }
        })
        .collect()
}
