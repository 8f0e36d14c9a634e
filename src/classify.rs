use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

use crate::results::CrawlResult;

/// Coarse content-purpose category of a page, used for prioritizing
/// remediation work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageRole {
    /// Conversion pages: pricing, products, services, checkout
    Money,
    /// Credibility pages: about, team, testimonials, case studies
    Trust,
    /// Topical content: blog, guides, resources, docs
    Authority,
    /// Everything else: help, legal, account plumbing
    Support,
}

impl PageRole {
    /// Base contribution of the role to the priority score
    pub fn base_score(&self) -> u8 {
        match self {
            PageRole::Money => 100,
            PageRole::Trust => 70,
            PageRole::Authority => 40,
            PageRole::Support => 20,
        }
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageRole::Money => "money",
            PageRole::Trust => "trust",
            PageRole::Authority => "authority",
            PageRole::Support => "support",
        };
        write!(f, "{}", name)
    }
}

const MONEY_PATH: &str =
    r"/(pricing|plans|buy|shop|store|cart|checkout|order|book|booking|quote|signup|sign-up|get-started|demo|services?|products?)(/|$)";
const TRUST_PATH: &str =
    r"/(about|about-us|team|testimonials?|reviews?|case-stud(?:y|ies)|clients|portfolio|our-work|contact)(/|$)";
const AUTHORITY_PATH: &str =
    r"/(blog|news|articles?|guides?|resources?|learn|insights?|docs|knowledge)(/|$)";
const SUPPORT_PATH: &str =
    r"/(help|support|faqs?|privacy|terms|legal|policy|policies|login|account|careers|sitemap)(/|$)";

const MONEY_KEYWORDS: [&str; 8] = [
    "pricing", "price", "buy", "hire", "quote", "order", "shop", "service",
];
const TRUST_KEYWORDS: [&str; 6] = [
    "about",
    "testimonial",
    "review",
    "team",
    "case study",
    "client",
];
const AUTHORITY_KEYWORDS: [&str; 6] = ["blog", "guide", "how to", "article", "news", "resource"];
const SUPPORT_KEYWORDS: [&str; 5] = ["faq", "help", "support", "privacy", "terms"];

/// Heuristic page-role classifier.
///
/// Rules are applied in a fixed order and the first match wins, so
/// classification is deterministic for identical inputs.
pub struct RoleClassifier {
    path_rules: Vec<(Regex, PageRole)>,
    keyword_rules: Vec<(&'static [&'static str], PageRole)>,
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleClassifier {
    pub fn new() -> Self {
        let path_rules = [
            (MONEY_PATH, PageRole::Money),
            (TRUST_PATH, PageRole::Trust),
            (AUTHORITY_PATH, PageRole::Authority),
            (SUPPORT_PATH, PageRole::Support),
        ]
        .into_iter()
        .map(|(pattern, role)| {
            let regex = Regex::new(pattern).expect("role path pattern should be valid");
            (regex, role)
        })
        .collect();

        let keyword_rules: Vec<(&'static [&'static str], PageRole)> = vec![
            (MONEY_KEYWORDS.as_slice(), PageRole::Money),
            (TRUST_KEYWORDS.as_slice(), PageRole::Trust),
            (AUTHORITY_KEYWORDS.as_slice(), PageRole::Authority),
            (SUPPORT_KEYWORDS.as_slice(), PageRole::Support),
        ];

        Self {
            path_rules,
            keyword_rules,
        }
    }

    /// Classify a page from its URL, title and first h1.
    ///
    /// Order: URL path patterns, then the bare-origin homepage special case,
    /// then keyword search across url+title+h1, then `Support`.
    pub fn classify(&self, url: &str, title: Option<&str>, h1: Option<&str>) -> PageRole {
        let path = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_ascii_lowercase(),
            Err(_) => url.to_ascii_lowercase(),
        };

        for (regex, role) in &self.path_rules {
            if regex.is_match(&path) {
                return *role;
            }
        }

        // The homepage is where conversions start
        if path.is_empty() || path == "/" {
            return PageRole::Money;
        }

        let haystack = format!(
            "{} {} {}",
            url.to_ascii_lowercase(),
            title.unwrap_or_default().to_ascii_lowercase(),
            h1.unwrap_or_default().to_ascii_lowercase()
        );
        for (keywords, role) in &self.keyword_rules {
            if keywords.iter().any(|keyword| haystack.contains(keyword)) {
                return *role;
            }
        }

        PageRole::Support
    }
}

/// Weighted remediation priority of a page, clamped to [0, 100].
///
/// role base + 30 if nav-linked + 10 if footer-linked
/// + min(2 * inbound, 20) - min(5 * depth, 20)
pub fn priority_score(
    role: PageRole,
    is_nav: bool,
    is_footer: bool,
    inbound_links: usize,
    url_depth: usize,
) -> u8 {
    let mut score = role.base_score() as i64;
    if is_nav {
        score += 30;
    }
    if is_footer {
        score += 10;
    }
    score += (inbound_links.min(1000) as i64 * 2).min(20);
    score -= (url_depth.min(1000) as i64 * 5).min(20);
    score.clamp(0, 100) as u8
}

/// Count how many distinct pages link to each internal URL across a
/// finished crawl, keyed by normalized URL
pub fn inbound_link_counts(results: &[CrawlResult]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for result in results {
        let mut seen_on_page: Vec<&str> = Vec::new();
        for link in &result.internal_links {
            if link.href == result.url || seen_on_page.contains(&link.href.as_str()) {
                continue;
            }
            seen_on_page.push(&link.href);
            *counts.entry(link.href.clone()).or_default() += 1;
        }
    }
    counts
}
