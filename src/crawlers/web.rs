use std::error::Error;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use crate::config::CrawlConfig;
use crate::crawlers::frontier::Frontier;
use crate::fetcher::PageFetcher;
use crate::filter::UrlFilter;
use crate::parsers;
use crate::results::{CrawlResult, CrawlStats};
use crate::robots::RobotsPolicy;

/// Delay between dequeue-fetch cycles; the only rate limiting applied
const CRAWL_DELAY: Duration = Duration::from_millis(200);

/// One breadth-first crawl of a single site.
///
/// The crawl is strictly sequential: one request in flight at a time, the
/// caller pulling results through [`next_page`](Self::next_page). Dropping
/// the crawler stops the crawl; there is no separate cancellation signal.
/// All per-page failures (network errors, timeouts, non-HTML responses)
/// are logged and skipped, never retried and never propagated.
pub struct SiteCrawler {
    config: CrawlConfig,
    filter: UrlFilter,
    fetcher: PageFetcher,
    robots: Option<RobotsPolicy>,
    frontier: Frontier,
    started: bool,
    throttled: bool,
}

impl SiteCrawler {
    /// Build a crawler for the configured start URL. Fails on an
    /// unparseable start URL or an unbuildable HTTP client.
    pub fn new(config: CrawlConfig) -> Result<Self, Box<dyn Error>> {
        let filter = UrlFilter::new(&config.start_url)?;
        let fetcher = PageFetcher::new(&config.user_agent, config.timeout_ms)?;
        Ok(Self {
            config,
            filter,
            fetcher,
            robots: None,
            frontier: Frontier::new(),
            started: false,
            throttled: false,
        })
    }

    /// Produce the next crawled page, or `None` when the frontier is
    /// exhausted or the page ceiling has been reached.
    pub async fn next_page(&mut self) -> Option<CrawlResult> {
        if !self.started {
            self.init().await;
        }

        loop {
            if self.frontier.visited_count() >= self.config.max_pages {
                ::log::info!(
                    "Page ceiling of {} reached, stopping crawl",
                    self.config.max_pages
                );
                return None;
            }

            let (url, depth) = self.frontier.pop()?;
            if self.frontier.is_visited(&url) {
                continue;
            }

            if let Some(robots) = &self.robots {
                if !robots.is_allowed(&url) {
                    ::log::debug!("robots.txt disallows {}", url);
                    self.frontier.mark_visited(&url);
                    continue;
                }
            }
            if self.filter.is_skippable_asset(&url) {
                ::log::debug!("Skipping asset URL {}", url);
                self.frontier.mark_visited(&url);
                continue;
            }

            self.frontier.mark_visited(&url);

            if self.throttled {
                tokio::time::sleep(CRAWL_DELAY).await;
            }
            self.throttled = true;

            let Some(fetched) = self.fetcher.fetch_page(&url).await else {
                continue;
            };
            let Ok(page_url) = Url::parse(&url) else {
                // Normalization fails open, so a malformed URL can reach
                // this point; it cannot be fetched into a page record
                ::log::debug!("Unparseable URL {} after fetch, skipping", url);
                continue;
            };

            let content = parsers::html::parse(&fetched.body, &page_url, &self.filter);

            if depth < self.config.max_depth {
                for link in &content.internal_links {
                    if self.frontier.offer(link.href.clone(), depth + 1) {
                        ::log::trace!("Queued {} at depth {}", link.href, depth + 1);
                    }
                }
            }

            ::log::info!(
                "Crawled {} ({} words, {} internal links)",
                url,
                content.word_count,
                content.internal_links.len()
            );

            return Some(CrawlResult {
                url,
                status_code: fetched.status_code,
                depth,
                title: content.title,
                h1: content.h1,
                meta_description: content.meta_description,
                canonical: content.canonical,
                lang: content.lang,
                headings: content.headings,
                cleaned_text: content.cleaned_text,
                word_count: content.word_count,
                text_hash: content.text_hash,
                internal_links: content.internal_links,
                external_links: content.external_links,
                structured_data: content.structured_data,
            });
        }
    }

    /// Current visited/queued counters, for progress reporting
    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            visited: self.frontier.visited_count(),
            queued: self.frontier.queued_count(),
        }
    }

    /// Seed the frontier and load robots.txt (fail-open) on first use
    async fn init(&mut self) {
        self.started = true;

        let seed = self.filter.normalize(&self.config.start_url);
        ::log::info!("Starting crawl of {}", seed);
        self.frontier.offer(seed, 0);

        if self.config.respect_robots_txt {
            let policy = match self.fetcher.fetch_robots_txt(self.filter.base()).await {
                Some(body) => RobotsPolicy::parse(&self.config.user_agent, &body),
                None => RobotsPolicy::allow_all(),
            };
            if policy.is_restricted() {
                ::log::info!("Loaded robots.txt rules for {}", self.config.start_url);
            }
            self.robots = Some(policy);
        }
    }
}

/// Start a crawl on a background task and receive results over a channel.
///
/// Dropping the receiver stops the crawl after the in-flight page.
pub async fn start(config: &CrawlConfig) -> Result<mpsc::Receiver<CrawlResult>, Box<dyn Error>> {
    let mut crawler = SiteCrawler::new(config.clone())?;
    let (result_tx, result_rx) = mpsc::channel::<CrawlResult>(64);

    tokio::spawn(async move {
        while let Some(result) = crawler.next_page().await {
            if result_tx.send(result).await.is_err() {
                ::log::debug!("Result receiver dropped, stopping crawl");
                return;
            }
        }
        let stats = crawler.stats();
        ::log::info!(
            "Crawl finished: {} visited, {} left queued",
            stats.visited,
            stats.queued
        );
    });

    Ok(result_rx)
}
