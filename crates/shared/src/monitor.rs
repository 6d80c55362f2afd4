use std::path::Path;

use async_trait::async_trait;

use crate::changes::{detect_changes, snapshot_state};
use crate::error::MonitorError;
use crate::models::{MetricsSnapshot, MonitorReport, Post};
use crate::metrics::SiteMetricsFetcher;
use crate::prompt::build_prompt;
use crate::state::{load_state, save_state};
use crate::summarizer::ClaudeSummarizer;
use crate::wordpress::WordPressClient;

/// Retrieves the most recently modified posts for a site.
#[async_trait]
pub trait PostFetcher: Send + Sync {
    async fn fetch_posts(&self, site_url: &str) -> Result<Vec<Post>, MonitorError>;
}

/// Retrieves the site-health snapshot, including the optional traffic
/// series.
#[async_trait]
pub trait MetricsFetcher: Send + Sync {
    async fn fetch_metrics(
        &self,
        site_url: &str,
        traffic_endpoint: Option<&str>,
    ) -> Result<MetricsSnapshot, MonitorError>;
}

/// Turns a rendered prompt into summary text. The credential is passed
/// per call so the orchestrator owns the missing-key check.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, api_key: &str, prompt: &str) -> Result<String, MonitorError>;
}

#[async_trait]
impl PostFetcher for WordPressClient {
    async fn fetch_posts(&self, site_url: &str) -> Result<Vec<Post>, MonitorError> {
        WordPressClient::fetch_posts(self, site_url).await
    }
}

#[async_trait]
impl MetricsFetcher for SiteMetricsFetcher {
    async fn fetch_metrics(
        &self,
        site_url: &str,
        traffic_endpoint: Option<&str>,
    ) -> Result<MetricsSnapshot, MonitorError> {
        SiteMetricsFetcher::fetch_metrics(self, site_url, traffic_endpoint).await
    }
}

#[async_trait]
impl Summarizer for ClaudeSummarizer {
    async fn summarize(&self, api_key: &str, prompt: &str) -> Result<String, MonitorError> {
        ClaudeSummarizer::summarize(self, api_key, prompt).await
    }
}

/// One monitoring run: load prior state, fetch posts and metrics, diff,
/// persist the new state, then summarize when enabled and warranted.
///
/// State is persisted before summarization is attempted, so a failed or
/// skipped summary never rolls it back. `summary` is empty whenever the
/// summarizer did not run.
#[allow(clippy::too_many_arguments)]
pub async fn run_monitor(
    site_url: &str,
    state_file: &Path,
    use_claude: bool,
    api_key: Option<&str>,
    traffic_endpoint: Option<&str>,
    posts: &dyn PostFetcher,
    metrics: &dyn MetricsFetcher,
    summarizer: &dyn Summarizer,
) -> Result<MonitorReport, MonitorError> {
    let previous_state = load_state(state_file)?;
    let current_posts = posts.fetch_posts(site_url).await?;
    let metrics_snapshot = metrics.fetch_metrics(site_url, traffic_endpoint).await?;
    let changes = detect_changes(&previous_state, &current_posts);

    save_state(state_file, &snapshot_state(&current_posts))?;

    let mut summary = String::new();
    if !changes.is_empty() && use_claude {
        let api_key = api_key.ok_or_else(|| {
            MonitorError::Auth(
                "ANTHROPIC_API_KEY is required when Claude summarization is enabled".to_string(),
            )
        })?;
        let prompt = build_prompt(site_url, &metrics_snapshot, &changes);
        summary = summarizer.summarize(api_key, &prompt).await?;
    }

    Ok(MonitorReport {
        changes,
        summary,
        metrics: metrics_snapshot,
    })
}
