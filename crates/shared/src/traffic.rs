use crate::models::{TrafficTrend, Trend};

/// Trend thresholds in percent. At or beyond either bound counts as a
/// move; strictly between them is stable.
const UP_THRESHOLD_PCT: f64 = 5.0;
const DOWN_THRESHOLD_PCT: f64 = -5.0;

const WINDOW: usize = 7;

// Sums in f64: a hostile endpoint can serve counts near u64::MAX, which
// would overflow an integer sum.
fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify a daily-visits series (oldest first) by comparing the trailing
/// 7-sample window against the 7 samples before it.
///
/// Short series are handled with partial windows: fewer than 14 samples
/// shrinks the earlier window, fewer than 7 shrinks the trailing one. A
/// series with no earlier window uses the trailing average as its own
/// baseline, which reads as no change. A zero baseline reports 0% change
/// rather than dividing by zero.
pub fn analyze_traffic_series(series: &[u64]) -> TrafficTrend {
    if series.is_empty() {
        return TrafficTrend::unavailable();
    }

    let split = series.len().saturating_sub(WINDOW);
    let last_7 = &series[split..];
    let previous_7 = &series[split.saturating_sub(WINDOW)..split];

    let last_7_avg = mean(last_7);
    let previous_7_avg = if previous_7.is_empty() {
        last_7_avg
    } else {
        mean(previous_7)
    };

    let change_pct = if previous_7_avg == 0.0 {
        0.0
    } else {
        (last_7_avg - previous_7_avg) / previous_7_avg * 100.0
    };

    let trend = if change_pct >= UP_THRESHOLD_PCT {
        Trend::Up
    } else if change_pct <= DOWN_THRESHOLD_PCT {
        Trend::Down
    } else {
        Trend::Stable
    };

    TrafficTrend {
        available: true,
        trend,
        last_7_avg: round2(last_7_avg),
        previous_7_avg: round2(previous_7_avg),
        change_pct: round2(change_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_unavailable() {
        let result = analyze_traffic_series(&[]);
        assert!(!result.available);
        assert_eq!(result.trend, Trend::Unknown);
        assert_eq!(result.last_7_avg, 0.0);
        assert_eq!(result.previous_7_avg, 0.0);
        assert_eq!(result.change_pct, 0.0);
    }

    #[test]
    fn test_two_full_windows_detect_upward_trend() {
        let mut series = vec![100; 7];
        series.extend(vec![120; 7]);
        let result = analyze_traffic_series(&series);
        assert!(result.available);
        assert_eq!(result.trend, Trend::Up);
        assert_eq!(result.last_7_avg, 120.0);
        assert_eq!(result.previous_7_avg, 100.0);
        assert_eq!(result.change_pct, 20.0);
    }

    #[test]
    fn test_downward_trend() {
        let mut series = vec![120; 7];
        series.extend(vec![88; 7]);
        let result = analyze_traffic_series(&series);
        assert_eq!(result.trend, Trend::Down);
        assert_eq!(result.change_pct, -26.67);
    }

    #[test]
    fn test_zero_baseline_reports_zero_change() {
        // All-zero earlier window with nonzero trailing window would divide
        // by zero; current behavior masks it as 0% change.
        let mut series = vec![0; 7];
        series.extend(vec![50; 7]);
        let result = analyze_traffic_series(&series);
        assert!(result.available);
        assert_eq!(result.change_pct, 0.0);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.last_7_avg, 50.0);
        assert_eq!(result.previous_7_avg, 0.0);
    }

    #[test]
    fn test_exactly_plus_five_percent_is_up() {
        let mut series = vec![100; 7];
        series.extend(vec![105; 7]);
        let result = analyze_traffic_series(&series);
        assert_eq!(result.change_pct, 5.0);
        assert_eq!(result.trend, Trend::Up);
    }

    #[test]
    fn test_exactly_minus_five_percent_is_down() {
        let mut series = vec![100; 7];
        series.extend(vec![95; 7]);
        let result = analyze_traffic_series(&series);
        assert_eq!(result.change_pct, -5.0);
        assert_eq!(result.trend, Trend::Down);
    }

    #[test]
    fn test_strictly_inside_thresholds_is_stable() {
        let mut series = vec![100; 7];
        series.extend(vec![104; 7]);
        let result = analyze_traffic_series(&series);
        assert_eq!(result.change_pct, 4.0);
        assert_eq!(result.trend, Trend::Stable);
    }

    #[test]
    fn test_short_series_uses_partial_window_and_stays_available() {
        // Fewer than 7 samples: trailing window is the whole series and
        // there is no earlier window, so the baseline equals the average.
        let result = analyze_traffic_series(&[100, 200, 300]);
        assert!(result.available);
        assert_eq!(result.last_7_avg, 200.0);
        assert_eq!(result.previous_7_avg, 200.0);
        assert_eq!(result.change_pct, 0.0);
        assert_eq!(result.trend, Trend::Stable);
    }

    #[test]
    fn test_between_seven_and_fourteen_samples_shrinks_earlier_window() {
        // 10 samples: trailing window is the last 7, earlier window is the
        // remaining 3.
        let series = [100, 100, 100, 110, 110, 110, 110, 110, 110, 110];
        let result = analyze_traffic_series(&series);
        assert_eq!(result.previous_7_avg, 100.0);
        assert_eq!(result.last_7_avg, 110.0);
        assert_eq!(result.change_pct, 10.0);
        assert_eq!(result.trend, Trend::Up);
    }

    #[test]
    fn test_huge_visit_counts_do_not_overflow() {
        let series = vec![u64::MAX; 14];
        let result = analyze_traffic_series(&series);
        assert!(result.available);
        assert_eq!(result.change_pct, 0.0);
        assert_eq!(result.trend, Trend::Stable);
        assert!(result.last_7_avg.is_finite());
    }

    #[test]
    fn test_averages_rounded_to_two_decimals() {
        let mut series = vec![100; 7];
        series.extend([100, 100, 100, 100, 100, 100, 101]);
        let result = analyze_traffic_series(&series);
        assert_eq!(result.last_7_avg, 100.14);
        assert_eq!(result.change_pct, 0.14);
    }
}
