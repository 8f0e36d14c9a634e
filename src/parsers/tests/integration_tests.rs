use crate::classify::{PageRole, RoleClassifier, priority_score};
use crate::filter::{UrlFilter, path_depth};
use crate::parsers::html;
use url::Url;

const PRICING_PAGE: &str = r#"<html lang="en"><head>
    <title>Plans and Pricing | Acme</title>
    <meta name="description" content="Simple pricing for every team.">
</head><body>
    <nav>
        <a href="/">Home</a>
        <a href="/pricing">Pricing</a>
        <a href="/blog">Blog</a>
    </nav>
    <main>
        <h1>Plans and Pricing</h1>
        <p>Pick the plan that fits. All plans include support.</p>
        <a href="/signup">Start free</a>
    </main>
    <footer><a href="/privacy">Privacy</a></footer>
</body></html>"#;

#[test]
fn test_parse_classify_score_pipeline() {
    let filter = UrlFilter::new("https://example.com").unwrap();
    let page_url = Url::parse("https://example.com/pricing").unwrap();
    let content = html::parse(PRICING_PAGE, &page_url, &filter);

    let classifier = RoleClassifier::new();
    let role = classifier.classify(
        page_url.as_str(),
        content.title.as_deref(),
        content.h1.as_deref(),
    );
    assert_eq!(role, PageRole::Money);

    // Nav-linked money page with 5 inbound links at path depth 1:
    // 100 + 30 + min(10, 20) - min(5, 20) = 135, clamped to 100
    let score = priority_score(role, true, false, 5, path_depth(page_url.as_str()));
    assert_eq!(score, 100);
}

#[test]
fn test_parsed_links_feed_classification() {
    let filter = UrlFilter::new("https://example.com").unwrap();
    let page_url = Url::parse("https://example.com/pricing").unwrap();
    let content = html::parse(PRICING_PAGE, &page_url, &filter);

    let classifier = RoleClassifier::new();
    let roles: Vec<PageRole> = content
        .internal_links
        .iter()
        .map(|link| classifier.classify(&link.href, None, None))
        .collect();

    // /, /pricing, /blog, /signup, /privacy in document order
    assert_eq!(
        roles,
        vec![
            PageRole::Money,
            PageRole::Money,
            PageRole::Authority,
            PageRole::Money,
            PageRole::Support,
        ]
    );
}

#[test]
fn test_deep_support_page_scores_low() {
    let classifier = RoleClassifier::new();
    let url = "https://example.com/help/account/password/reset";
    let role = classifier.classify(url, Some("Reset your password"), None);
    assert_eq!(role, PageRole::Support);

    // 20 + 0 + 0 - min(20, 20) = 0
    assert_eq!(priority_score(role, false, false, 0, path_depth(url)), 0);
}
