use serde::{Deserialize, Serialize};
use std::fmt;

/// A WordPress post normalized from the REST API payload.
/// Identity is `id`; every field is carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub modified: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Updated,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::New => write!(f, "new"),
            ChangeType::Updated => write!(f, "updated"),
        }
    }
}

/// A post that is new or was modified since the previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(flatten)]
    pub post: Post,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    Unknown,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
            Trend::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of classifying a daily-visits series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficTrend {
    pub available: bool,
    pub trend: Trend,
    pub last_7_avg: f64,
    pub previous_7_avg: f64,
    pub change_pct: f64,
}

impl TrafficTrend {
    /// Placeholder used when no traffic endpoint is configured or the
    /// series came back empty.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            trend: Trend::Unknown,
            last_7_avg: 0.0,
            previous_7_avg: 0.0,
            change_pct: 0.0,
        }
    }
}

/// Coarse site-health snapshot: aggregate counts plus the traffic trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub post_count: u64,
    pub page_count: u64,
    pub comment_count: u64,
    pub traffic: TrafficTrend,
    pub traffic_samples: usize,
}

/// Everything a run produces: detected changes, the Claude summary
/// (empty string when summarization was skipped), and the metrics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub changes: Vec<ChangeRecord>,
    pub summary: String,
    pub metrics: MetricsSnapshot,
}
