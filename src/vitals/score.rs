//! Composite health score.
//!
//! Starts at 100 and deducts a fixed penalty per present metric that leaves
//! its acceptable band, with a larger penalty for the more extreme tier.
//! The result is a heuristic for display only and must be presented with
//! `HealthScore::ADVISORY_NOTICE`.

use serde::{Deserialize, Serialize};

use crate::models::{Metric, VitalReading, VitalStatus};

use super::bands::SCORE_RULES;

const MAX_SCORE: i32 = 100;

/// 0-100 advisory score for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthScore(u8);

impl HealthScore {
    pub const ADVISORY_NOTICE: &'static str =
        "This score is a general wellness indicator, not a medical diagnosis. \
         Talk to a healthcare professional about any concerns.";

    fn from_points(points: i32) -> Self {
        Self(points.clamp(0, MAX_SCORE) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One penalty applied while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub metric: Metric,
    pub value: f64,
    pub status: VitalStatus,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: HealthScore,
    pub deductions: Vec<Deduction>,
}

/// Score a reading. Absent metrics deduct nothing, so an empty reading
/// scores 100.
pub fn score(reading: &VitalReading) -> HealthScore {
    score_breakdown(reading).score
}

/// Score a reading and report which metrics cost points.
pub fn score_breakdown(reading: &VitalReading) -> ScoreBreakdown {
    let deductions: Vec<Deduction> = SCORE_RULES
        .iter()
        .filter_map(|rule| {
            let value = reading.value(rule.metric)?;
            let (status, points) = rule.deduction(value);
            (points > 0).then_some(Deduction {
                metric: rule.metric,
                value,
                status,
                points,
            })
        })
        .collect();

    let total: i32 = deductions.iter().map(|d| d.points).sum();

    ScoreBreakdown {
        score: HealthScore::from_points(MAX_SCORE - total),
        deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_reading(values: &[(Metric, f64)]) -> VitalReading {
        values
            .iter()
            .fold(VitalReading::now(), |r, &(m, v)| r.with(m, v))
    }

    #[test]
    fn empty_reading_scores_100() {
        assert_eq!(score(&VitalReading::now()).value(), 100);
    }

    #[test]
    fn null_fields_score_100() {
        let json = r#"{"recorded_at": "2026-01-01T00:00:00", "heart_rate": null, "spo2": null}"#;
        let reading: VitalReading = serde_json::from_str(json).unwrap();
        assert_eq!(score(&reading).value(), 100);
    }

    #[test]
    fn high_heart_rate_deducts_15() {
        let reading = make_reading(&[(Metric::HeartRate, 110.0)]);
        assert_eq!(score(&reading).value(), 85);
    }

    #[test]
    fn healthy_reading_scores_100() {
        let reading = make_reading(&[
            (Metric::HeartRate, 75.0),
            (Metric::Spo2, 97.0),
            (Metric::SleepHours, 8.0),
            (Metric::Hydration, 9.0),
            (Metric::StressLevel, 2.0),
        ]);
        let breakdown = score_breakdown(&reading);
        assert_eq!(breakdown.score.value(), 100);
        assert!(breakdown.deductions.is_empty());
    }

    #[test]
    fn mild_tiers() {
        let cases = [
            (Metric::HeartRate, 65.0, 95),
            (Metric::HeartRate, 95.0, 95),
            (Metric::Spo2, 92.0, 90),
            (Metric::BloodPressureSystolic, 135.0, 95),
            (Metric::SleepHours, 6.0, 95),
            (Metric::SleepHours, 9.5, 95),
            (Metric::Hydration, 5.0, 95),
            (Metric::StressLevel, 6.0, 92),
        ];
        for (metric, value, expected) in cases {
            let reading = make_reading(&[(metric, value)]);
            assert_eq!(score(&reading).value(), expected, "{metric}={value}");
        }
    }

    #[test]
    fn severe_tiers() {
        let cases = [
            (Metric::HeartRate, 50.0, 85),
            (Metric::Spo2, 85.0, 80),
            (Metric::BloodPressureSystolic, 150.0, 85),
            (Metric::SleepHours, 4.0, 90),
            (Metric::SleepHours, 11.0, 90),
            (Metric::Hydration, 2.0, 90),
            (Metric::StressLevel, 9.0, 85),
        ];
        for (metric, value, expected) in cases {
            let reading = make_reading(&[(metric, value)]);
            assert_eq!(score(&reading).value(), expected, "{metric}={value}");
        }
    }

    #[test]
    fn hydration_of_eight_is_acceptable() {
        let reading = make_reading(&[(Metric::Hydration, 8.0)]);
        assert_eq!(score(&reading).value(), 100);
    }

    #[test]
    fn worst_case_stays_in_range() {
        let reading = make_reading(&[
            (Metric::HeartRate, 30.0),
            (Metric::Spo2, 70.0),
            (Metric::BloodPressureSystolic, 200.0),
            (Metric::SleepHours, 1.0),
            (Metric::Hydration, 0.0),
            (Metric::StressLevel, 10.0),
        ]);
        let breakdown = score_breakdown(&reading);
        // 100 - (15 + 20 + 15 + 10 + 10 + 15) = 15
        assert_eq!(breakdown.score.value(), 15);
        assert_eq!(breakdown.deductions.len(), 6);
        assert!(breakdown.deductions.iter().all(|d| d.status == VitalStatus::Critical));
    }

    #[test]
    fn unscored_metrics_do_not_deduct() {
        let reading = make_reading(&[
            (Metric::Weight, 300.0),
            (Metric::Temperature, 104.0),
            (Metric::BloodGlucose, 400.0),
            (Metric::BloodPressureDiastolic, 130.0),
        ]);
        assert_eq!(score(&reading).value(), 100);
    }

    #[test]
    fn score_never_increases_moving_away_from_good() {
        let other = [(Metric::Spo2, 93.0), (Metric::StressLevel, 6.0)];
        let mut previous = u8::MAX;
        for hr in (75..=200).step_by(5) {
            let mut values = other.to_vec();
            values.push((Metric::HeartRate, hr as f64));
            let current = score(&make_reading(&values)).value();
            assert!(current <= previous, "hr={hr}: {current} > {previous}");
            previous = current;
        }

        let mut previous = u8::MAX;
        for spo2 in (60..=99).rev() {
            let current = score(&make_reading(&[(Metric::Spo2, spo2 as f64)])).value();
            assert!(current <= previous, "spo2={spo2}");
            previous = current;
        }
    }

    fn assert_non_increasing(metric: Metric, values: impl IntoIterator<Item = f64>) {
        let mut previous = u8::MAX;
        for value in values {
            let current = score(&make_reading(&[(metric, value)])).value();
            assert!(current <= previous, "{metric}={value}: {current} > {previous}");
            previous = current;
        }
    }

    #[test]
    fn every_scored_metric_is_monotonic() {
        // systolic up and down from the good band
        assert_non_increasing(Metric::BloodPressureSystolic, (115..=220).map(f64::from));
        assert_non_increasing(Metric::BloodPressureSystolic, (40..=115).rev().map(f64::from));
        // sleep in half-hour steps, both directions
        assert_non_increasing(Metric::SleepHours, (16..=30).map(|h| f64::from(h) / 2.0));
        assert_non_increasing(Metric::SleepHours, (0..=16).rev().map(|h| f64::from(h) / 2.0));
        assert_non_increasing(Metric::Hydration, (0..=12).rev().map(f64::from));
        assert_non_increasing(Metric::StressLevel, (0..=10).map(f64::from));
        assert_non_increasing(Metric::HeartRate, (40..=80).rev().map(f64::from));
    }

    #[test]
    fn display_includes_percent() {
        assert_eq!(score(&VitalReading::now()).to_string(), "100%");
    }
}
