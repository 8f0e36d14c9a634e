use clap::Parser;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use sitefix_crawler::filter::path_depth;
use sitefix_crawler::{
    CrawlConfig, CrawlResult, CrawlSession, PageRole, RoleClassifier, inbound_link_counts,
    priority_score,
};

mod args;
use args::{Args, OutputFormat};

/// A crawled page enriched with its role and remediation priority
#[derive(Debug, Serialize)]
struct PageReport {
    #[serde(flatten)]
    page: CrawlResult,
    role: PageRole,
    priority: u8,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    ::log::info!("Starting crawl of {}", config.start_url);
    let start_time = std::time::Instant::now();

    let mut rx = match CrawlSession::with_config(config).generate().await {
        Ok(rx) => rx,
        Err(e) => {
            ::log::error!("Failed to start crawler: {}", e);
            std::process::exit(1);
        }
    };

    // Drain the crawl before scoring: priority needs inbound-link counts
    // over the whole site
    let mut pages = Vec::new();
    while let Some(page) = rx.recv().await {
        ::log::info!("Crawled page {}: {}", pages.len() + 1, page.url);
        pages.push(page);
    }

    let duration = start_time.elapsed();
    ::log::info!(
        "Crawling complete - {} pages in {:.2} seconds",
        pages.len(),
        duration.as_secs_f64()
    );

    let reports = build_reports(pages);
    match args.output {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Text => print_text(&reports),
    }
}

fn build_config(args: &Args) -> Result<CrawlConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config_file {
        return CrawlConfig::from_file(path);
    }

    let mut config = CrawlConfig::new(&args.url);
    config.max_pages = args.max_pages;
    config.max_depth = args.max_depth;
    config.timeout_ms = args.timeout;
    config.respect_robots_txt = !args.no_robots;
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    Ok(config)
}

/// Classify and score every crawled page, highest priority first
fn build_reports(pages: Vec<CrawlResult>) -> Vec<PageReport> {
    let classifier = RoleClassifier::new();
    let inbound = inbound_link_counts(&pages);

    // Which pages are reachable from nav/footer anywhere on the site
    let mut nav_linked: HashSet<&str> = HashSet::new();
    let mut footer_linked: HashSet<&str> = HashSet::new();
    for page in &pages {
        for link in &page.internal_links {
            if link.is_nav {
                nav_linked.insert(&link.href);
            }
            if link.is_footer {
                footer_linked.insert(&link.href);
            }
        }
    }
    let nav_linked: HashSet<String> = nav_linked.into_iter().map(String::from).collect();
    let footer_linked: HashSet<String> = footer_linked.into_iter().map(String::from).collect();

    let mut reports: Vec<PageReport> = pages
        .into_iter()
        .map(|page| {
            let role = classifier.classify(&page.url, page.title.as_deref(), page.h1.as_deref());
            let priority = priority_score(
                role,
                nav_linked.contains(&page.url),
                footer_linked.contains(&page.url),
                inbound.get(&page.url).copied().unwrap_or(0),
                path_depth(&page.url),
            );
            PageReport {
                page,
                role,
                priority,
            }
        })
        .collect();

    reports.sort_by(|a, b| b.priority.cmp(&a.priority));
    reports
}

fn print_json(reports: &[PageReport]) {
    for report in reports {
        match serde_json::to_string(report) {
            Ok(line) => println!("{}", line),
            Err(e) => ::log::error!("Failed to serialize {}: {}", report.page.url, e),
        }
    }
}

fn print_text(reports: &[PageReport]) {
    let mut role_totals: HashMap<PageRole, usize> = HashMap::new();

    println!("{:>8}  {:>9}  {:>6}  {:>7}  url", "priority", "role", "status", "words");
    for report in reports {
        *role_totals.entry(report.role).or_default() += 1;
        println!(
            "{:>8}  {:>9}  {:>6}  {:>7}  {}",
            report.priority,
            report.role.to_string(),
            report.page.status_code,
            report.page.word_count,
            report.page.url
        );
    }

    println!();
    println!("{} pages crawled", reports.len());
    for role in [
        PageRole::Money,
        PageRole::Trust,
        PageRole::Authority,
        PageRole::Support,
    ] {
        if let Some(count) = role_totals.get(&role) {
            println!("  {:>9}: {}", role.to_string(), count);
        }
    }
}
