//! Static threshold tables.
//!
//! Three tables live here, one per consumer:
//! - classifier bands (heart rate, SpO2, systolic pressure)
//! - scoring rules (two deduction tiers for six metrics)
//! - alert rules (critical tier, then warning tier, each checked in order)
//!
//! The alert thresholds are deliberately wider than the classifier bands:
//! a reading can show a "critical" card without raising an alert.

use serde::Serialize;

use crate::models::{AlertSeverity, Metric, VitalStatus};

// ---------------------------------------------------------------------------
// MetricBand
// ---------------------------------------------------------------------------

/// Numeric bands for one metric. Outside `[warning_min, warning_max]` is
/// critical; inside it but outside `[good_min, good_max]` is warning.
/// Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricBand {
    pub good_min: f64,
    pub good_max: f64,
    pub warning_min: f64,
    pub warning_max: f64,
}

impl MetricBand {
    pub const fn new(good_min: f64, good_max: f64, warning_min: f64, warning_max: f64) -> Self {
        Self {
            good_min,
            good_max,
            warning_min,
            warning_max,
        }
    }

    /// Critical first, then warning, then good.
    pub fn status(&self, value: f64) -> VitalStatus {
        if value < self.warning_min || value > self.warning_max {
            VitalStatus::Critical
        } else if value < self.good_min || value > self.good_max {
            VitalStatus::Warning
        } else {
            VitalStatus::Good
        }
    }
}

pub const HEART_RATE_BAND: MetricBand = MetricBand::new(70.0, 90.0, 60.0, 100.0);
pub const SPO2_BAND: MetricBand = MetricBand::new(95.0, f64::INFINITY, 90.0, f64::INFINITY);
pub const SYSTOLIC_BAND: MetricBand = MetricBand::new(100.0, 130.0, 90.0, 140.0);
pub const SLEEP_BAND: MetricBand = MetricBand::new(7.0, 9.0, 5.0, 10.0);
pub const HYDRATION_BAND: MetricBand =
    MetricBand::new(8.0, f64::INFINITY, 4.0, f64::INFINITY);
pub const STRESS_BAND: MetricBand =
    MetricBand::new(f64::NEG_INFINITY, 5.0, f64::NEG_INFINITY, 7.0);

/// Band used by the status classifier, if the metric is classifiable.
pub fn classifier_band(metric: Metric) -> Option<&'static MetricBand> {
    match metric {
        Metric::HeartRate => Some(&HEART_RATE_BAND),
        Metric::Spo2 => Some(&SPO2_BAND),
        Metric::BloodPressureSystolic => Some(&SYSTOLIC_BAND),
        _ => None,
    }
}

/// Metrics the classifier has bands for, in display order.
pub const CLASSIFIED_METRICS: [Metric; 3] =
    [Metric::HeartRate, Metric::Spo2, Metric::BloodPressureSystolic];

// ---------------------------------------------------------------------------
// Scoring rules
// ---------------------------------------------------------------------------

/// Deductions applied when a metric leaves its good band (mild) or its
/// warning band (severe).
#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    pub metric: Metric,
    pub band: MetricBand,
    pub severe_penalty: i32,
    pub mild_penalty: i32,
}

pub const SCORE_RULES: [ScoreRule; 6] = [
    ScoreRule {
        metric: Metric::HeartRate,
        band: HEART_RATE_BAND,
        severe_penalty: 15,
        mild_penalty: 5,
    },
    ScoreRule {
        metric: Metric::Spo2,
        band: SPO2_BAND,
        severe_penalty: 20,
        mild_penalty: 10,
    },
    ScoreRule {
        metric: Metric::BloodPressureSystolic,
        band: SYSTOLIC_BAND,
        severe_penalty: 15,
        mild_penalty: 5,
    },
    ScoreRule {
        metric: Metric::SleepHours,
        band: SLEEP_BAND,
        severe_penalty: 10,
        mild_penalty: 5,
    },
    ScoreRule {
        metric: Metric::Hydration,
        band: HYDRATION_BAND,
        severe_penalty: 10,
        mild_penalty: 5,
    },
    ScoreRule {
        metric: Metric::StressLevel,
        band: STRESS_BAND,
        severe_penalty: 15,
        mild_penalty: 8,
    },
];

impl ScoreRule {
    /// Points to deduct for `value`, with the status that caused them.
    pub fn deduction(&self, value: f64) -> (VitalStatus, i32) {
        match self.band.status(value) {
            VitalStatus::Critical => (VitalStatus::Critical, self.severe_penalty),
            VitalStatus::Warning => (VitalStatus::Warning, self.mild_penalty),
            VitalStatus::Good => (VitalStatus::Good, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// Alert rules
// ---------------------------------------------------------------------------

/// Condition under which an alert rule fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// value < limit
    Below(f64),
    /// value < low or value > high
    Outside { low: f64, high: f64 },
    /// value > limit
    Above(f64),
    /// from <= value < to
    Between { from: f64, to: f64 },
}

impl Threshold {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Threshold::Below(limit) => value < limit,
            Threshold::Outside { low, high } => value < low || value > high,
            Threshold::Above(limit) => value > limit,
            Threshold::Between { from, to } => value >= from && value < to,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub metric: Metric,
    pub threshold: Threshold,
    pub severity: AlertSeverity,
}

/// Auto-SOS tier. Checked in this order; first match wins.
pub const CRITICAL_RULES: [AlertRule; 3] = [
    AlertRule {
        metric: Metric::Spo2,
        threshold: Threshold::Below(85.0),
        severity: AlertSeverity::Critical,
    },
    AlertRule {
        metric: Metric::HeartRate,
        threshold: Threshold::Outside {
            low: 40.0,
            high: 140.0,
        },
        severity: AlertSeverity::Critical,
    },
    AlertRule {
        metric: Metric::BloodPressureSystolic,
        threshold: Threshold::Outside {
            low: 80.0,
            high: 180.0,
        },
        severity: AlertSeverity::Critical,
    },
];

/// Silent warning tier, consulted only when no critical rule fired.
pub const WARNING_RULES: [AlertRule; 4] = [
    AlertRule {
        metric: Metric::Spo2,
        threshold: Threshold::Between {
            from: 85.0,
            to: 92.0,
        },
        severity: AlertSeverity::Warning,
    },
    AlertRule {
        metric: Metric::HeartRate,
        threshold: Threshold::Outside {
            low: 50.0,
            high: 120.0,
        },
        severity: AlertSeverity::Warning,
    },
    AlertRule {
        metric: Metric::BloodPressureSystolic,
        threshold: Threshold::Outside {
            low: 90.0,
            high: 140.0,
        },
        severity: AlertSeverity::Warning,
    },
    AlertRule {
        metric: Metric::StressLevel,
        threshold: Threshold::Above(7.0),
        severity: AlertSeverity::Warning,
    },
];
