use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::models::{Metric, Trend, VitalReading};

/// Metrics shown on the trends overview.
pub const KEY_TREND_METRICS: [Metric; 4] = [
    Metric::HeartRate,
    Metric::StressLevel,
    Metric::Hydration,
    Metric::SleepHours,
];

/// Direction of one metric across recent history.
///
/// Only the last `window` readings are considered. The mean of the first two
/// present values is compared with the mean of the last two; a relative
/// change within `tolerance` is stable. Missing values are skipped rather
/// than counted as zero.
pub fn trend(history: &[VitalReading], metric: Metric, window: usize, tolerance: f64) -> Trend {
    if history.len() < 2 {
        return Trend::Stable;
    }

    let recent = &history[history.len().saturating_sub(window)..];
    let values: Vec<f64> = recent.iter().filter_map(|r| r.value(metric)).collect();
    if values.is_empty() {
        return Trend::Stable;
    }

    let pair = values.len().min(2);
    let earlier = mean(&values[..pair]);
    let later = mean(&values[values.len() - pair..]);

    if later > earlier * (1.0 + tolerance) {
        Trend::Up
    } else if later < earlier * (1.0 - tolerance) {
        Trend::Down
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Trend summary card for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTrend {
    pub metric: Metric,
    pub label: String,
    /// Most recent present value, if any.
    pub latest: Option<f64>,
    pub trend: Trend,
}

impl KeyTrend {
    pub fn display_value(&self) -> String {
        let Some(v) = self.latest else {
            return "No data".to_string();
        };
        match self.metric {
            Metric::HeartRate => format!("{v:.0} bpm"),
            Metric::StressLevel => format!("Level {v:.0}"),
            Metric::Hydration => format!("{v:.0} glasses"),
            Metric::SleepHours => format!("{v} hrs"),
            other => format!("{v} {}", other.unit()),
        }
    }
}

/// Trends for heart rate, stress, hydration and sleep. `history` must be
/// oldest first.
pub fn key_trends(history: &[VitalReading], config: &MonitorConfig) -> Vec<KeyTrend> {
    KEY_TREND_METRICS
        .iter()
        .map(|&metric| KeyTrend {
            metric,
            label: metric.label().to_string(),
            latest: history.iter().rev().find_map(|r| r.value(metric)),
            trend: trend(history, metric, config.trend_window, config.trend_tolerance),
        })
        .collect()
}
