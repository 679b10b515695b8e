use serde::{Deserialize, Serialize};

use crate::models::{Metric, VitalReading, VitalStatus};

use super::bands::{classifier_band, CLASSIFIED_METRICS};

/// Status of one metric in a reading, for display cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStatus {
    pub metric: Metric,
    pub value: f64,
    pub status: VitalStatus,
}

/// Classify a single vital. Absent or non-finite values and metrics without
/// a registered band are `Good`.
pub fn classify(metric: Metric, value: Option<f64>) -> VitalStatus {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return VitalStatus::Good;
    };
    match classifier_band(metric) {
        Some(band) => band.status(value),
        None => VitalStatus::Good,
    }
}

/// Classify by metric key (`heart_rate`, `heartRate`, `bp_systolic`, ...).
/// Unknown keys are `Good`.
pub fn classify_name(metric: &str, value: Option<f64>) -> VitalStatus {
    match Metric::from_key(metric) {
        Some(metric) => classify(metric, value),
        None => VitalStatus::Good,
    }
}

/// Status of every classifiable metric present in the reading.
pub fn classify_reading(reading: &VitalReading) -> Vec<MetricStatus> {
    CLASSIFIED_METRICS
        .iter()
        .filter_map(|&metric| {
            let value = reading.value(metric)?;
            Some(MetricStatus {
                metric,
                value,
                status: classify(metric, Some(value)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tachycardia_is_critical() {
        assert_eq!(classify(Metric::HeartRate, Some(110.0)), VitalStatus::Critical);
        assert_eq!(classify_name("heartRate", Some(110.0)), VitalStatus::Critical);
    }

    #[test]
    fn mild_hypoxia_is_warning() {
        assert_eq!(classify_name("spo2", Some(93.0)), VitalStatus::Warning);
    }

    #[test]
    fn systolic_bands() {
        assert_eq!(classify(Metric::BloodPressureSystolic, Some(115.0)), VitalStatus::Good);
        assert_eq!(classify(Metric::BloodPressureSystolic, Some(135.0)), VitalStatus::Warning);
        assert_eq!(classify(Metric::BloodPressureSystolic, Some(95.0)), VitalStatus::Warning);
        assert_eq!(classify(Metric::BloodPressureSystolic, Some(145.0)), VitalStatus::Critical);
        assert_eq!(classify(Metric::BloodPressureSystolic, Some(85.0)), VitalStatus::Critical);
    }

    #[test]
    fn absent_values_are_good() {
        assert_eq!(classify(Metric::HeartRate, None), VitalStatus::Good);
        assert_eq!(classify(Metric::Spo2, None), VitalStatus::Good);
        assert_eq!(classify(Metric::Spo2, Some(f64::NAN)), VitalStatus::Good);
    }

    #[test]
    fn unknown_metric_is_good() {
        assert_eq!(classify_name("steps", Some(0.0)), VitalStatus::Good);
        assert_eq!(classify(Metric::Weight, Some(400.0)), VitalStatus::Good);
        assert_eq!(classify(Metric::SleepHours, Some(2.0)), VitalStatus::Good);
    }

    #[test]
    fn out_of_range_numbers_never_panic() {
        assert_eq!(classify(Metric::HeartRate, Some(-20.0)), VitalStatus::Critical);
        assert_eq!(classify(Metric::Spo2, Some(250.0)), VitalStatus::Good);
        assert_eq!(classify(Metric::HeartRate, Some(f64::INFINITY)), VitalStatus::Good);
    }

    #[test]
    fn classify_is_deterministic() {
        for metric in Metric::ALL {
            for value in [-5.0, 0.0, 59.5, 75.0, 92.0, 101.0, 141.0] {
                assert_eq!(classify(metric, Some(value)), classify(metric, Some(value)));
            }
        }
    }

    #[test]
    fn classify_reading_skips_absent_metrics() {
        let reading = VitalReading::now()
            .with(Metric::HeartRate, 65.0)
            .with(Metric::SleepHours, 8.0);
        let statuses = classify_reading(&reading);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].metric, Metric::HeartRate);
        assert_eq!(statuses[0].status, VitalStatus::Warning);
    }
}
