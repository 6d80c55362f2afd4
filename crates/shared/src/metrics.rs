use serde_json::Value;

use crate::error::MonitorError;
use crate::models::{MetricsSnapshot, TrafficTrend};
use crate::traffic::analyze_traffic_series;
use crate::wordpress::WordPressClient;

/// Extract a daily-visits series from a traffic payload.
///
/// The payload is either a bare list of `{"visits": <n>}` records or an
/// object holding such a list under "data". Entries whose visits value is
/// not a non-negative integer are skipped; anything else yields an empty
/// series rather than an error, since traffic data is optional.
pub fn parse_traffic_series(payload: &Value) -> Vec<u64> {
    let records = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data").and_then(|d| d.as_array()) {
            Some(items) => items.as_slice(),
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    records
        .iter()
        .filter_map(|record| record.get("visits").and_then(|v| v.as_u64()))
        .collect()
}

/// Assembles the site-health snapshot from per-resource count headers and
/// the optional traffic endpoint.
pub struct SiteMetricsFetcher {
    wordpress: WordPressClient,
}

impl SiteMetricsFetcher {
    pub fn new() -> Result<Self, MonitorError> {
        Ok(Self {
            wordpress: WordPressClient::new()?,
        })
    }

    pub async fn fetch_metrics(
        &self,
        site_url: &str,
        traffic_endpoint: Option<&str>,
    ) -> Result<MetricsSnapshot, MonitorError> {
        let post_count = self.wordpress.fetch_resource_count(site_url, "posts").await?;
        let page_count = self.wordpress.fetch_resource_count(site_url, "pages").await?;
        let comment_count = self
            .wordpress
            .fetch_resource_count(site_url, "comments")
            .await?;

        let series = match traffic_endpoint {
            Some(endpoint) => {
                let payload = self.wordpress.fetch_traffic_payload(endpoint).await?;
                parse_traffic_series(&payload)
            }
            None => Vec::new(),
        };

        let traffic = if series.is_empty() {
            TrafficTrend::unavailable()
        } else {
            analyze_traffic_series(&series)
        };

        Ok(MetricsSnapshot {
            post_count,
            page_count,
            comment_count,
            traffic,
            traffic_samples: series.len(),
        })
    }
}
