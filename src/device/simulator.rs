use std::ops::Range;

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Metric, ReadingSource, VitalReading};

/// Value ranges for one kind of simulated reading. Upper bounds exclusive.
#[derive(Debug, Clone)]
pub struct ReadingRanges {
    pub heart_rate: Range<i32>,
    pub spo2: Range<i32>,
    pub sleep_hours: Range<f64>,
    pub stress_level: Range<i32>,
    pub systolic: Range<i32>,
    pub diastolic: Range<i32>,
}

/// Resting readings used to seed history.
pub const BASELINE_RANGES: ReadingRanges = ReadingRanges {
    heart_rate: 60..100,
    spo2: 92..101,
    sleep_hours: 6.0..8.0,
    stress_level: 0..10,
    systolic: 110..140,
    diastolic: 70..90,
};

/// Wider ranges used during a sync burst, wide enough to trip alerts.
pub const SYNC_RANGES: ReadingRanges = ReadingRanges {
    heart_rate: 50..110,
    spo2: 85..105,
    sleep_hours: 4.0..8.0,
    stress_level: 0..10,
    systolic: 100..150,
    diastolic: 65..95,
};

const SPO2_MAX: f64 = 100.0;
const HISTORY_SPACING_SECS: i64 = 15;

/// Fake wearable. Seed it for reproducible readings.
pub struct DeviceSimulator {
    rng: StdRng,
}

impl DeviceSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn baseline_reading(&mut self, at: NaiveDateTime) -> VitalReading {
        self.generate(&BASELINE_RANGES, at)
    }

    pub fn sync_reading(&mut self, at: NaiveDateTime) -> VitalReading {
        self.generate(&SYNC_RANGES, at)
    }

    /// `n` baseline readings spaced 15 s apart, the last at the current time.
    pub fn initial_history(&mut self, n: usize) -> Vec<VitalReading> {
        let now = chrono::Local::now().naive_local();
        (0..n)
            .rev()
            .map(|i| {
                let at = now - Duration::seconds(HISTORY_SPACING_SECS * i as i64);
                self.baseline_reading(at)
            })
            .collect()
    }

    fn generate(&mut self, ranges: &ReadingRanges, at: NaiveDateTime) -> VitalReading {
        let sleep = self.rng.gen_range(ranges.sleep_hours.clone());
        let spo2 = f64::from(self.rng.gen_range(ranges.spo2.clone())).min(SPO2_MAX);

        VitalReading::new(at)
            .with_source(ReadingSource::Device)
            .with(Metric::HeartRate, f64::from(self.rng.gen_range(ranges.heart_rate.clone())))
            .with(Metric::Spo2, spo2)
            .with(Metric::SleepHours, (sleep * 10.0).round() / 10.0)
            .with(Metric::StressLevel, f64::from(self.rng.gen_range(ranges.stress_level.clone())))
            .with(Metric::BloodPressureSystolic, f64::from(self.rng.gen_range(ranges.systolic.clone())))
            .with(Metric::BloodPressureDiastolic, f64::from(self.rng.gen_range(ranges.diastolic.clone())))
    }
}

impl Default for DeviceSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(reading: &VitalReading, metric: Metric, low: f64, high: f64) -> bool {
        reading.value(metric).is_some_and(|v| v >= low && v <= high)
    }

    #[test]
    fn baseline_values_stay_in_range() {
        let mut sim = DeviceSimulator::seeded(7);
        let now = chrono::Local::now().naive_local();
        for _ in 0..200 {
            let r = sim.baseline_reading(now);
            assert_eq!(r.source, ReadingSource::Device);
            assert!(in_range(&r, Metric::HeartRate, 60.0, 99.0));
            assert!(in_range(&r, Metric::Spo2, 92.0, 100.0));
            assert!(in_range(&r, Metric::SleepHours, 6.0, 8.0));
            assert!(in_range(&r, Metric::StressLevel, 0.0, 9.0));
            assert!(in_range(&r, Metric::BloodPressureSystolic, 110.0, 139.0));
            assert!(in_range(&r, Metric::BloodPressureDiastolic, 70.0, 89.0));
        }
    }

    #[test]
    fn sync_spo2_is_capped() {
        let mut sim = DeviceSimulator::seeded(11);
        let now = chrono::Local::now().naive_local();
        for _ in 0..200 {
            let r = sim.sync_reading(now);
            assert!(in_range(&r, Metric::Spo2, 85.0, 100.0));
            assert!(in_range(&r, Metric::HeartRate, 50.0, 109.0));
        }
    }

    #[test]
    fn same_seed_same_readings() {
        let at = chrono::Local::now().naive_local();
        let a = DeviceSimulator::seeded(42).sync_reading(at);
        let b = DeviceSimulator::seeded(42).sync_reading(at);
        for metric in Metric::ALL {
            assert_eq!(a.value(metric), b.value(metric));
        }
    }

    #[test]
    fn initial_history_is_spaced_and_ascending() {
        let history = DeviceSimulator::seeded(1).initial_history(20);
        assert_eq!(history.len(), 20);
        for pair in history.windows(2) {
            assert_eq!(pair[1].recorded_at - pair[0].recorded_at, Duration::seconds(15));
        }
    }
}
