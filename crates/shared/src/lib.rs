// Public modules
pub mod changes;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod prompt;
pub mod state;
pub mod summarizer;
pub mod traffic;
pub mod wordpress;

// Re-export commonly used types
pub use changes::{detect_changes, snapshot_state};
pub use config::Config;
pub use error::MonitorError;
pub use metrics::SiteMetricsFetcher;
pub use models::{ChangeRecord, ChangeType, MetricsSnapshot, MonitorReport, Post, TrafficTrend, Trend};
pub use monitor::{run_monitor, MetricsFetcher, PostFetcher, Summarizer};
pub use prompt::build_prompt;
pub use state::{load_state, save_state};
pub use summarizer::ClaudeSummarizer;
pub use traffic::analyze_traffic_series;
pub use wordpress::WordPressClient;
