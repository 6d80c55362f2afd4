use crate::models::{ChangeRecord, MetricsSnapshot};

/// Render the summary request sent to Claude: site, instruction header,
/// metrics block, one line per changed post. Pure formatting, no I/O.
pub fn build_prompt(site_url: &str, metrics: &MetricsSnapshot, changes: &[ChangeRecord]) -> String {
    let mut lines = vec![
        format!("WordPress site: {}", site_url),
        "You are monitoring content changes.".to_string(),
        "Summarize what changed and provide 3 operational recommendations.".to_string(),
        String::new(),
        "Site metrics snapshot:".to_string(),
        format!("- Posts: {}", metrics.post_count),
        format!("- Pages: {}", metrics.page_count),
        format!("- Comments: {}", metrics.comment_count),
    ];

    if metrics.traffic.available {
        lines.push(format!(
            "- Traffic: trend={} (last 7-day avg {}, previous {}, change {}%, {} samples)",
            metrics.traffic.trend,
            metrics.traffic.last_7_avg,
            metrics.traffic.previous_7_avg,
            metrics.traffic.change_pct,
            metrics.traffic_samples,
        ));
    } else {
        lines.push("- Traffic: unavailable (no traffic data)".to_string());
    }

    lines.push(String::new());
    lines.push("Changed posts:".to_string());
    for change in changes {
        lines.push(format!(
            "- [{}] {} ({}) {}",
            change.change_type, change.post.title, change.post.modified, change.post.link
        ));
    }

    lines.join("\n")
}
