use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Every measurement a reading can carry.
    Metric {
        #[serde(alias = "heartRate")]
        HeartRate => "heart_rate",
        Spo2 => "spo2",
        #[serde(alias = "bloodPressureSystolic", alias = "bp_systolic")]
        BloodPressureSystolic => "blood_pressure_systolic",
        #[serde(alias = "bloodPressureDiastolic", alias = "bp_diastolic")]
        BloodPressureDiastolic => "blood_pressure_diastolic",
        Temperature => "temperature",
        #[serde(alias = "bloodGlucose")]
        BloodGlucose => "blood_glucose",
        Weight => "weight",
        #[serde(alias = "sleepHours")]
        SleepHours => "sleep_hours",
        #[serde(alias = "stressLevel")]
        StressLevel => "stress_level",
        Hydration => "hydration",
    }
);

str_enum!(
    /// Tri-state severity of a single vital.
    VitalStatus {
        Good => "good",
        Warning => "warning",
        Critical => "critical",
    }
);

str_enum!(
    /// Severity of a threshold alert. Critical alerts escalate.
    AlertSeverity {
        Warning => "warning",
        Critical => "critical",
    }
);

str_enum!(
    /// Direction of a metric over recent history.
    Trend {
        Up => "up",
        Down => "down",
        Stable => "stable",
    }
);

str_enum!(
    ReadingSource {
        Manual => "manual",
        Device => "device",
    }
);

str_enum!(
    MealType {
        Breakfast => "breakfast",
        Lunch => "lunch",
        Dinner => "dinner",
        Snack => "snack",
    }
);

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::HeartRate,
        Metric::Spo2,
        Metric::BloodPressureSystolic,
        Metric::BloodPressureDiastolic,
        Metric::Temperature,
        Metric::BloodGlucose,
        Metric::Weight,
        Metric::SleepHours,
        Metric::StressLevel,
        Metric::Hydration,
    ];

    /// Parse a metric key in snake_case, camelCase, or the dashboard's
    /// short `bp_systolic` / `bp_diastolic` form.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "heartRate" => Some(Metric::HeartRate),
            "bloodPressureSystolic" | "bp_systolic" => Some(Metric::BloodPressureSystolic),
            "bloodPressureDiastolic" | "bp_diastolic" => Some(Metric::BloodPressureDiastolic),
            "bloodGlucose" => Some(Metric::BloodGlucose),
            "sleepHours" => Some(Metric::SleepHours),
            "stressLevel" => Some(Metric::StressLevel),
            other => other.parse().ok(),
        }
    }

    /// Display label used in alert titles and trend cards.
    pub fn label(self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::Spo2 => "SpO2",
            Metric::BloodPressureSystolic => "Blood Pressure",
            Metric::BloodPressureDiastolic => "Blood Pressure (diastolic)",
            Metric::Temperature => "Temperature",
            Metric::BloodGlucose => "Blood Glucose",
            Metric::Weight => "Weight",
            Metric::SleepHours => "Sleep",
            Metric::StressLevel => "Stress",
            Metric::Hydration => "Hydration",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::HeartRate => "bpm",
            Metric::Spo2 => "%",
            Metric::BloodPressureSystolic | Metric::BloodPressureDiastolic => "mmHg",
            Metric::Temperature => "°F",
            Metric::BloodGlucose => "mg/dL",
            Metric::Weight => "kg",
            Metric::SleepHours => "hrs",
            Metric::StressLevel => "/10",
            Metric::Hydration => "glasses",
        }
    }

    /// Integer-valued metrics are rounded on form entry.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Metric::HeartRate
                | Metric::BloodPressureSystolic
                | Metric::BloodPressureDiastolic
                | Metric::StressLevel
                | Metric::Hydration
        )
    }
}

impl VitalStatus {
    fn rank(self) -> u8 {
        match self {
            VitalStatus::Good => 0,
            VitalStatus::Warning => 1,
            VitalStatus::Critical => 2,
        }
    }
}

impl PartialOrd for VitalStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VitalStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn metric_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_str(metric.as_str()).unwrap(), metric);
        }
    }

    #[test]
    fn metric_accepts_camel_case_keys() {
        assert_eq!(Metric::from_key("heartRate"), Some(Metric::HeartRate));
        assert_eq!(Metric::from_key("spo2"), Some(Metric::Spo2));
        assert_eq!(
            Metric::from_key("bloodPressureSystolic"),
            Some(Metric::BloodPressureSystolic)
        );
        assert_eq!(Metric::from_key("bp_systolic"), Some(Metric::BloodPressureSystolic));
        assert_eq!(Metric::from_key("stressLevel"), Some(Metric::StressLevel));
        assert_eq!(Metric::from_key("steps"), None);
    }

    #[test]
    fn metric_deserializes_camel_case() {
        let metric: Metric = serde_json::from_str("\"heartRate\"").unwrap();
        assert_eq!(metric, Metric::HeartRate);
        let metric: Metric = serde_json::from_str("\"bp_systolic\"").unwrap();
        assert_eq!(metric, Metric::BloodPressureSystolic);
        for metric in Metric::ALL {
            let json = format!("\"{}\"", metric.as_str());
            assert_eq!(serde_json::from_str::<Metric>(&json).unwrap(), metric);
        }
    }

    #[test]
    fn metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::BloodPressureSystolic).unwrap();
        assert_eq!(json, "\"blood_pressure_systolic\"");
        let json = serde_json::to_string(&Metric::Spo2).unwrap();
        assert_eq!(json, "\"spo2\"");
    }

    #[test]
    fn vital_status_ordering() {
        assert!(VitalStatus::Good < VitalStatus::Warning);
        assert!(VitalStatus::Warning < VitalStatus::Critical);
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = VitalStatus::from_str("alarming").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid enum value for VitalStatus: alarming"
        );
        assert!(Trend::from_str("").is_err());
        assert!(ReadingSource::from_str("Device").is_err());
    }
}
