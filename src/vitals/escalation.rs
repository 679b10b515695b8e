//! Escalation of critical alerts to the primary emergency contact.
//!
//! The alerter only decides. This module turns an escalating alert into an
//! instruction and hands it to a `Notifier`, which owns actual delivery
//! (push, SMS, log). Delivery is fire-and-forget: failures are logged and
//! reported in the outcome, never propagated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{primary_contact, AlertSeverity, EmergencyContact};

use super::alerts::AlertEvent;
use super::messages::AlertMessages;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Instruction for an external notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationInstruction {
    pub contact: EmergencyContact,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Delivers escalation instructions. Implementations must handle
/// at-least-once delivery themselves.
pub trait Notifier: Send + Sync {
    fn notify(&self, instruction: &EscalationInstruction) -> Result<(), NotifyError>;
}

/// Notifier that only writes the instruction to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, instruction: &EscalationInstruction) -> Result<(), NotifyError> {
        tracing::warn!(
            contact = %instruction.contact.name,
            phone = %instruction.contact.phone,
            severity = instruction.severity.as_str(),
            "Emergency SOS triggered"
        );
        Ok(())
    }
}

/// What happened to an alert's escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum EscalationOutcome {
    /// No alert, or the alert does not escalate.
    NotRequired,
    /// Escalation requested but there is no primary contact to notify.
    NoContactConfigured,
    Notified { contact_name: String },
    DeliveryFailed { reason: String },
}

/// Build the instruction for an escalating alert, if there is a primary
/// contact to receive it.
pub fn build_instruction(
    alert: &AlertEvent,
    contacts: &[EmergencyContact],
) -> Option<EscalationInstruction> {
    if !alert.escalate {
        return None;
    }
    let contact = primary_contact(contacts)?;
    Some(EscalationInstruction {
        contact: contact.clone(),
        message: AlertMessages::escalation(&contact.name, &alert.message),
        severity: alert.severity,
    })
}

/// Hand an escalating alert to the notifier.
pub fn dispatch_escalation(
    alert: Option<&AlertEvent>,
    contacts: &[EmergencyContact],
    notifier: &dyn Notifier,
) -> EscalationOutcome {
    let Some(alert) = alert.filter(|a| a.escalate) else {
        return EscalationOutcome::NotRequired;
    };

    let Some(instruction) = build_instruction(alert, contacts) else {
        tracing::warn!(
            metric = alert.metric.as_str(),
            "Critical alert raised but no primary emergency contact is configured"
        );
        return EscalationOutcome::NoContactConfigured;
    };

    match notifier.notify(&instruction) {
        Ok(()) => {
            tracing::info!(
                metric = alert.metric.as_str(),
                contact = %instruction.contact.name,
                "Primary emergency contact notified"
            );
            EscalationOutcome::Notified {
                contact_name: instruction.contact.name,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Escalation delivery failed");
            EscalationOutcome::DeliveryFailed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::{Metric, VitalReading};
    use crate::vitals::alerts::evaluate;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<EscalationInstruction>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, instruction: &EscalationInstruction) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(instruction.clone());
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _: &EscalationInstruction) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("sms gateway unreachable".into()))
        }
    }

    fn critical_alert(has_contact: bool) -> AlertEvent {
        let reading = VitalReading::now().with(Metric::Spo2, 80.0);
        evaluate(&reading, has_contact).unwrap()
    }

    fn contacts() -> Vec<EmergencyContact> {
        vec![
            EmergencyContact::new("Sam", "555-0101"),
            EmergencyContact::new("Riley", "555-0102").primary(),
        ]
    }

    #[test]
    fn notifies_primary_contact() {
        let notifier = RecordingNotifier::default();
        let alert = critical_alert(true);
        let outcome = dispatch_escalation(Some(&alert), &contacts(), &notifier);

        assert_eq!(
            outcome,
            EscalationOutcome::Notified {
                contact_name: "Riley".into()
            }
        );
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].contact.phone, "555-0102");
        assert_eq!(sent[0].severity, AlertSeverity::Critical);
        assert!(sent[0].message.contains("critically low at 80%"));
    }

    #[test]
    fn no_primary_contact() {
        let notifier = RecordingNotifier::default();
        let alert = critical_alert(false);
        let only_secondary = vec![EmergencyContact::new("Sam", "555-0101")];
        let outcome = dispatch_escalation(Some(&alert), &only_secondary, &notifier);
        assert_eq!(outcome, EscalationOutcome::NoContactConfigured);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn warnings_are_not_escalated() {
        let notifier = RecordingNotifier::default();
        let reading = VitalReading::now().with(Metric::StressLevel, 9.0);
        let alert = evaluate(&reading, true).unwrap();
        let outcome = dispatch_escalation(Some(&alert), &contacts(), &notifier);
        assert_eq!(outcome, EscalationOutcome::NotRequired);
        assert_eq!(
            dispatch_escalation(None, &contacts(), &notifier),
            EscalationOutcome::NotRequired
        );
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn delivery_failure_is_reported_not_raised() {
        let alert = critical_alert(true);
        let outcome = dispatch_escalation(Some(&alert), &contacts(), &FailingNotifier);
        assert_eq!(
            outcome,
            EscalationOutcome::DeliveryFailed {
                reason: "Delivery failed: sms gateway unreachable".into()
            }
        );
    }

    #[test]
    fn log_notifier_always_succeeds() {
        let alert = critical_alert(true);
        let outcome = dispatch_escalation(Some(&alert), &contacts(), &LogNotifier);
        assert!(matches!(outcome, EscalationOutcome::Notified { .. }));
    }
}
