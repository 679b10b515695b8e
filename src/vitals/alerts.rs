use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{AlertSeverity, Metric, VitalReading};

use super::bands::{AlertRule, CRITICAL_RULES, WARNING_RULES};
use super::messages::AlertMessages;

/// Where an escalating alert would be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationTarget {
    /// Notify the user's primary emergency contact.
    PrimaryContact,
    /// Escalation requested but the user has no primary contact. The caller
    /// should prompt the user to add one instead of doing nothing.
    NoContactConfigured,
}

/// Result of the threshold alerter. Ephemeral; delivery is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub metric: Metric,
    pub value: f64,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub escalate: bool,
    /// `None` unless `escalate` is set.
    pub escalation_target: Option<EscalationTarget>,
    pub recorded_at: NaiveDateTime,
}

impl AlertEvent {
    pub fn is_critical(&self) -> bool {
        self.severity == AlertSeverity::Critical
    }

    pub fn missing_contact(&self) -> bool {
        self.escalation_target == Some(EscalationTarget::NoContactConfigured)
    }
}

/// Scan a reading against the critical tier, then the warning tier.
///
/// First match wins, so at most one alert is raised per reading. Absent
/// metrics never match. Returns `None` when nothing is abnormal; callers
/// should clear any previously shown alert.
pub fn evaluate(reading: &VitalReading, has_primary_contact: bool) -> Option<AlertEvent> {
    let (rule, value) = first_match(reading, &CRITICAL_RULES)
        .or_else(|| first_match(reading, &WARNING_RULES))?;

    let escalate = rule.severity == AlertSeverity::Critical;
    let escalation_target = escalate.then_some(if has_primary_contact {
        EscalationTarget::PrimaryContact
    } else {
        EscalationTarget::NoContactConfigured
    });

    Some(AlertEvent {
        metric: rule.metric,
        value,
        severity: rule.severity,
        title: AlertMessages::title(rule.metric, rule.severity),
        message: AlertMessages::message(rule.metric, rule.severity, value, reading),
        escalate,
        escalation_target,
        recorded_at: reading.recorded_at,
    })
}

fn first_match<'r>(reading: &VitalReading, rules: &'r [AlertRule]) -> Option<(&'r AlertRule, f64)> {
    rules.iter().find_map(|rule| {
        let value = reading.value(rule.metric)?;
        rule.threshold.matches(value).then_some((rule, value))
    })
}
