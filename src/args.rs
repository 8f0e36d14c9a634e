use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "sitefix-crawler")]
#[command(about = "Crawls a site and ranks its pages for remediation work")]
#[command(version)]
pub struct Args {
    /// URL to start crawling from
    pub url: String,

    /// Maximum number of pages to visit
    #[arg(long, default_value_t = 50)]
    pub max_pages: usize,

    /// Maximum link depth from the start URL
    #[arg(long, default_value_t = 3)]
    pub max_depth: usize,

    /// User-agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    pub timeout: u64,

    /// Ignore robots.txt
    #[arg(long, default_value_t = false)]
    pub no_robots: bool,

    /// Path to a JSON configuration file (takes precedence over the flags above)
    #[arg(long)]
    pub config_file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable priority report
    Text,
    /// One JSON object per page
    Json,
}
