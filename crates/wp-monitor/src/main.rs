use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use shared::{run_monitor, ClaudeSummarizer, Config, SiteMetricsFetcher, WordPressClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wp-monitor")]
#[command(about = "Monitor WordPress content changes and summarize them with Claude")]
struct Args {
    /// WordPress site base URL
    #[arg(long)]
    site_url: String,

    /// Path to the local state JSON file
    #[arg(long)]
    state_file: PathBuf,

    /// Disable the Claude call and only report detected changes
    #[arg(long)]
    no_claude: bool,

    /// Optional traffic endpoint serving daily visit counts
    #[arg(long)]
    traffic_endpoint: Option<String>,

    /// Number of most-recently-modified posts to fetch
    #[arg(long, default_value = "20")]
    limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    println!(
        "Checking {} at {}",
        args.site_url,
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    let fetcher = WordPressClient::with_page_size(args.limit)?;
    let metrics_fetcher = SiteMetricsFetcher::new()?;
    let summarizer = ClaudeSummarizer::new()?;

    let api_key = if args.no_claude {
        None
    } else {
        config.anthropic_api_key.as_deref()
    };

    let report = run_monitor(
        &args.site_url,
        &args.state_file,
        !args.no_claude,
        api_key,
        args.traffic_endpoint.as_deref(),
        &fetcher,
        &metrics_fetcher,
        &summarizer,
    )
    .await
    .context("Monitor run failed")?;

    println!("Detected changes: {}", report.changes.len());
    for change in &report.changes {
        println!(
            "- [{}] {} ({})",
            change.change_type, change.post.title, change.post.modified
        );
    }

    let metrics = &report.metrics;
    println!(
        "Site metrics: {} posts, {} pages, {} comments",
        metrics.post_count, metrics.page_count, metrics.comment_count
    );
    if metrics.traffic.available {
        println!(
            "Traffic trend: {} ({}% over {} samples)",
            metrics.traffic.trend, metrics.traffic.change_pct, metrics.traffic_samples
        );
    } else {
        println!("Traffic trend: unavailable");
    }

    if !report.summary.is_empty() {
        println!("\nClaude summary:\n");
        println!("{}", report.summary);
    }

    Ok(())
}
