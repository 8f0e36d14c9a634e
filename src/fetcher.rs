use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

/// A successful page download
#[derive(Debug)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// HTTP fetcher for one crawl session: fixed user-agent, bounded timeout,
/// redirects followed, no retries
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout_ms: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a page, returning `None` on any network error, timeout or
    /// non-HTML content type. Failures are logged and never retried.
    pub async fn fetch_page(&self, url: &str) -> Option<FetchedPage> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        if !is_html_content_type(&response) {
            ::log::debug!("Skipping non-HTML content at {}", url);
            return None;
        }

        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => Some(FetchedPage { status_code, body }),
            Err(e) => {
                ::log::warn!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch robots.txt from the origin of `base`. Returns `None` on any
    /// failure or non-2xx status so the caller can fall back to an
    /// unrestricted policy.
    pub async fn fetch_robots_txt(&self, base: &Url) -> Option<String> {
        let robots_url = base.join("/robots.txt").ok()?;
        match self.client.get(robots_url.as_str()).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                ::log::info!(
                    "robots.txt at {} returned {}, treating as unrestricted",
                    robots_url,
                    response.status()
                );
                None
            }
            Err(e) => {
                ::log::info!(
                    "robots.txt at {} unreachable, treating as unrestricted: {}",
                    robots_url,
                    e
                );
                None
            }
        }
    }
}

/// A response is parseable only when it declares an HTML content type;
/// a missing header counts as non-HTML
fn is_html_content_type(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let lower = value.to_ascii_lowercase();
            lower.starts_with("text/html") || lower.starts_with("application/xhtml+xml")
        })
        .unwrap_or(false)
}
