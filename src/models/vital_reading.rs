use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::enums::{Metric, ReadingSource};

impl Default for ReadingSource {
    fn default() -> Self {
        ReadingSource::Manual
    }
}

/// A snapshot of zero or more measurements taken at one point in time.
///
/// Every measurement is optional. Absent means "not measured" and is never
/// read as zero by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "recordedAt")]
    pub recorded_at: NaiveDateTime,
    #[serde(default)]
    pub source: ReadingSource,
    #[serde(default, alias = "heartRate", deserialize_with = "lenient_int")]
    pub heart_rate: Option<i32>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub spo2: Option<f64>,
    #[serde(default, alias = "bloodPressureSystolic", deserialize_with = "lenient_int")]
    pub blood_pressure_systolic: Option<i32>,
    #[serde(default, alias = "bloodPressureDiastolic", deserialize_with = "lenient_int")]
    pub blood_pressure_diastolic: Option<i32>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub temperature: Option<f64>,
    #[serde(default, alias = "bloodGlucose", deserialize_with = "lenient_float")]
    pub blood_glucose: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub weight: Option<f64>,
    #[serde(default, alias = "sleepHours", deserialize_with = "lenient_float")]
    pub sleep_hours: Option<f64>,
    #[serde(default, alias = "stressLevel", deserialize_with = "lenient_int")]
    pub stress_level: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub hydration: Option<i32>,
}

impl VitalReading {
    /// An empty reading stamped at `recorded_at`.
    pub fn new(recorded_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            source: ReadingSource::Manual,
            heart_rate: None,
            spo2: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            temperature: None,
            blood_glucose: None,
            weight: None,
            sleep_hours: None,
            stress_level: None,
            hydration: None,
        }
    }

    /// An empty reading stamped with the local wall clock.
    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn with_source(mut self, source: ReadingSource) -> Self {
        self.source = source;
        self
    }

    /// Value of `metric` if present and finite.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let raw = match metric {
            Metric::HeartRate => self.heart_rate.map(f64::from),
            Metric::Spo2 => self.spo2,
            Metric::BloodPressureSystolic => self.blood_pressure_systolic.map(f64::from),
            Metric::BloodPressureDiastolic => self.blood_pressure_diastolic.map(f64::from),
            Metric::Temperature => self.temperature,
            Metric::BloodGlucose => self.blood_glucose,
            Metric::Weight => self.weight,
            Metric::SleepHours => self.sleep_hours,
            Metric::StressLevel => self.stress_level.map(f64::from),
            Metric::Hydration => self.hydration.map(f64::from),
        };
        raw.filter(|v| v.is_finite())
    }

    /// Set or clear a measurement. Non-finite values clear it.
    /// Integer metrics are rounded to the nearest whole number and cleared
    /// when they do not fit in an `i32`.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let value = value.filter(|v| v.is_finite());
        let int = || value.and_then(|v| checked_int(v.round()));
        match metric {
            Metric::HeartRate => self.heart_rate = int(),
            Metric::Spo2 => self.spo2 = value,
            Metric::BloodPressureSystolic => self.blood_pressure_systolic = int(),
            Metric::BloodPressureDiastolic => self.blood_pressure_diastolic = int(),
            Metric::Temperature => self.temperature = value,
            Metric::BloodGlucose => self.blood_glucose = value,
            Metric::Weight => self.weight = value,
            Metric::SleepHours => self.sleep_hours = value,
            Metric::StressLevel => self.stress_level = int(),
            Metric::Hydration => self.hydration = int(),
        }
    }

    /// Build a reading from string-keyed form input. Blank or unparseable
    /// entries and unknown keys are skipped.
    pub fn from_form<'a, I>(recorded_at: NaiveDateTime, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut reading = Self::new(recorded_at);
        for (key, raw) in fields {
            let Some(metric) = Metric::from_key(key) else {
                tracing::debug!(key, "Ignoring unknown vitals form field");
                continue;
            };
            if let Some(value) = parse_number(raw) {
                reading.set(metric, Some(value));
            }
        }
        reading
    }

    /// Metrics that carry a value, in `Metric::ALL` order.
    pub fn present_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.value(*m).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_metrics().is_empty()
    }

    /// "120/80" style blood pressure, or just the systolic value when the
    /// diastolic is missing.
    pub fn blood_pressure_display(&self) -> Option<String> {
        let systolic = self.blood_pressure_systolic?;
        Some(match self.blood_pressure_diastolic {
            Some(diastolic) => format!("{systolic}/{diastolic}"),
            None => systolic.to_string(),
        })
    }
}

/// Parse user-entered text as a finite number. Blank, non-numeric, and
/// NaN/infinite input yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn number_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number_from_json(&value))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number_from_json(&value).and_then(|v| checked_int(v.round())))
}

/// Whole-number value that fits in `i32`. Anything else is dropped rather
/// than saturated.
fn checked_int(rounded: f64) -> Option<i32> {
    if rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Some(rounded as i32)
    } else {
        tracing::debug!(value = rounded, "Dropping out-of-range integer measurement");
        None
    }
}
