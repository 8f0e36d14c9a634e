use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sitefix_crawler::{CrawlResult, CrawlSession, SiteCrawler};

type Routes = HashMap<&'static str, (u16, &'static str, String)>;

/// Serve a fixed set of routes over plain HTTP/1.1 on an ephemeral port,
/// returning the site's base URL. Unknown paths get a 404.
async fn spawn_site(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let (status, content_type, body) = match routes.get(path) {
                    Some((status, content_type, body)) => {
                        (*status, *content_type, body.clone())
                    }
                    None => (404, "text/plain", "not found".to_string()),
                };
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    content_type,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://127.0.0.1:{}", addr.port())
}

fn html_page(links: &[&str]) -> (u16, &'static str, String) {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    (
        200,
        "text/html; charset=utf-8",
        format!("<html><body><p>page body</p>{}</body></html>", anchors),
    )
}

async fn drain(mut crawler: SiteCrawler) -> (Vec<CrawlResult>, usize) {
    let mut pages = Vec::new();
    while let Some(page) = crawler.next_page().await {
        pages.push(page);
    }
    (pages, crawler.stats().visited)
}

#[tokio::test]
async fn test_dedup_assets_and_non_html() {
    let mut routes = Routes::new();
    routes.insert(
        "/",
        html_page(&[
            "/a",
            "/a/",
            "/logo.png",
            "/report",
            "https://other.example/x",
        ]),
    );
    routes.insert("/a", html_page(&["/c", "/"]));
    routes.insert(
        "/report",
        (200, "application/pdf", "%PDF-1.4".to_string()),
    );
    routes.insert("/c", html_page(&[]));
    // No /robots.txt route: the 404 must leave the crawl unrestricted

    let base = spawn_site(routes).await;
    let crawler = CrawlSession::new(&base).into_crawler().unwrap();
    let (pages, visited) = drain(crawler).await;

    let urls: Vec<&str> = pages.iter().map(|page| page.url.as_str()).collect();
    // /a and /a/ normalize to one entry; /logo.png is skipped by extension;
    // /report is fetched but yields nothing (non-HTML); the external link
    // is never queued
    assert_eq!(
        urls,
        vec![
            base.clone(),
            format!("{}/a", base),
            format!("{}/c", base),
        ]
    );
    // Visited also counts the asset and non-HTML entries
    assert_eq!(visited, 5);

    // External links are reported, not crawled
    assert_eq!(pages[0].external_links, vec!["https://other.example/x"]);
    assert_eq!(pages[0].status_code, 200);
}

#[tokio::test]
async fn test_page_ceiling_bounds_visited() {
    let mut routes = Routes::new();
    routes.insert("/", html_page(&["/a", "/b", "/c", "/d"]));
    routes.insert("/a", html_page(&[]));
    routes.insert("/b", html_page(&[]));
    routes.insert("/c", html_page(&[]));
    routes.insert("/d", html_page(&[]));

    let base = spawn_site(routes).await;
    let crawler = CrawlSession::new(&base)
        .with_max_pages(2)
        .into_crawler()
        .unwrap();
    let (pages, visited) = drain(crawler).await;

    assert_eq!(pages.len(), 2);
    assert!(visited <= 2);
}

#[tokio::test]
async fn test_depth_ceiling_stops_expansion() {
    let mut routes = Routes::new();
    routes.insert("/", html_page(&["/level1"]));
    routes.insert("/level1", html_page(&["/level2"]));
    routes.insert("/level2", html_page(&["/level3"]));
    routes.insert("/level3", html_page(&[]));

    let base = spawn_site(routes).await;
    let crawler = CrawlSession::new(&base)
        .with_max_depth(1)
        .into_crawler()
        .unwrap();
    let (pages, _) = drain(crawler).await;

    let urls: Vec<&str> = pages.iter().map(|page| page.url.as_str()).collect();
    // /level2 is discovered at depth 2 and never fetched
    assert_eq!(urls, vec![base.clone(), format!("{}/level1", base)]);
    assert_eq!(pages[1].depth, 1);
    // The page at the depth ceiling still has its links recorded
    assert_eq!(pages[1].internal_links.len(), 1);
}

#[tokio::test]
async fn test_robots_disallow_skips_without_fetching() {
    let mut routes = Routes::new();
    routes.insert(
        "/robots.txt",
        (
            200,
            "text/plain",
            "User-agent: *\nDisallow: /admin\n".to_string(),
        ),
    );
    routes.insert("/", html_page(&["/admin", "/open"]));
    routes.insert("/admin", html_page(&[]));
    routes.insert("/open", html_page(&[]));

    let base = spawn_site(routes).await;
    let crawler = CrawlSession::new(&base).into_crawler().unwrap();
    let (pages, visited) = drain(crawler).await;

    let urls: Vec<&str> = pages.iter().map(|page| page.url.as_str()).collect();
    assert_eq!(urls, vec![base.clone(), format!("{}/open", base)]);
    // The disallowed URL still enters the visited set
    assert_eq!(visited, 3);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let mut routes = Routes::new();
    routes.insert(
        "/robots.txt",
        (
            200,
            "text/plain",
            "User-agent: *\nDisallow: /\n".to_string(),
        ),
    );
    routes.insert("/", html_page(&["/admin"]));
    routes.insert("/admin", html_page(&[]));

    let base = spawn_site(routes).await;
    let crawler = CrawlSession::new(&base)
        .with_respect_robots_txt(false)
        .into_crawler()
        .unwrap();
    let (pages, _) = drain(crawler).await;

    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_channel_front_delivers_same_results() {
    let mut routes = Routes::new();
    routes.insert("/", html_page(&["/a"]));
    routes.insert("/a", html_page(&[]));

    let base = spawn_site(routes).await;
    let mut rx = CrawlSession::new(&base).generate().await.unwrap();

    let mut urls = Vec::new();
    while let Some(page) = rx.recv().await {
        urls.push(page.url);
    }
    assert_eq!(urls, vec![base.clone(), format!("{}/a", base)]);
}
