use crate::models::{AlertSeverity, Metric, VitalReading};

/// Human-readable alert titles and messages. Every message names the
/// metric and the measured value.
pub struct AlertMessages;

impl AlertMessages {
    pub fn title(metric: Metric, severity: AlertSeverity) -> String {
        match severity {
            AlertSeverity::Critical => format!("Critical {} Alert", metric.label()),
            AlertSeverity::Warning => format!("{} Warning", metric.label()),
        }
    }

    pub fn message(
        metric: Metric,
        severity: AlertSeverity,
        value: f64,
        reading: &VitalReading,
    ) -> String {
        let shown = format_value(value);
        match (metric, severity) {
            (Metric::Spo2, AlertSeverity::Critical) => {
                format!("Oxygen saturation critically low at {shown}%")
            }
            (Metric::Spo2, AlertSeverity::Warning) => {
                format!("Low oxygen saturation: {shown}%")
            }
            (Metric::HeartRate, AlertSeverity::Critical) => {
                format!("Heart rate at dangerous level: {shown} bpm")
            }
            (Metric::HeartRate, AlertSeverity::Warning) => {
                format!("Abnormal heart rate: {shown} bpm")
            }
            (Metric::BloodPressureSystolic, AlertSeverity::Critical) => format!(
                "Blood pressure at critical level: {}",
                reading.blood_pressure_display().unwrap_or(shown)
            ),
            (Metric::BloodPressureSystolic, AlertSeverity::Warning) => format!(
                "Blood pressure out of range: {}",
                reading.blood_pressure_display().unwrap_or(shown)
            ),
            (Metric::StressLevel, _) => format!("High stress detected: {shown}/10"),
            (other, _) => format!("{} reading of {shown} {}", other.label(), other.unit()),
        }
    }

    /// Text sent to the primary contact on escalation.
    pub fn escalation(contact_name: &str, alert_message: &str) -> String {
        format!(
            "{contact_name}, you are listed as a primary emergency contact. \
             A critical reading was recorded: {alert_message}. \
             Please check on them right away."
        )
    }
}

/// Whole numbers print without a decimal point.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spo2_messages() {
        let reading = VitalReading::now().with(Metric::Spo2, 82.0);
        assert_eq!(
            AlertMessages::message(Metric::Spo2, AlertSeverity::Critical, 82.0, &reading),
            "Oxygen saturation critically low at 82%"
        );
        assert_eq!(
            AlertMessages::message(Metric::Spo2, AlertSeverity::Warning, 88.5, &reading),
            "Low oxygen saturation: 88.5%"
        );
    }

    #[test]
    fn blood_pressure_includes_diastolic() {
        let reading = VitalReading::now()
            .with(Metric::BloodPressureSystolic, 190.0)
            .with(Metric::BloodPressureDiastolic, 110.0);
        assert_eq!(
            AlertMessages::message(
                Metric::BloodPressureSystolic,
                AlertSeverity::Critical,
                190.0,
                &reading
            ),
            "Blood pressure at critical level: 190/110"
        );
    }

    #[test]
    fn titles() {
        assert_eq!(
            AlertMessages::title(Metric::HeartRate, AlertSeverity::Warning),
            "Heart Rate Warning"
        );
        assert_eq!(
            AlertMessages::title(Metric::Spo2, AlertSeverity::Critical),
            "Critical SpO2 Alert"
        );
    }
}
