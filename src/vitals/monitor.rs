//! Per-user vitals monitoring.
//!
//! Ties the pure evaluators to a store and a notifier: each ingested
//! reading is persisted, classified, scored and checked against the alert
//! tiers. Critical alerts are handed to the notifier for escalation.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::models::{primary_contact, VitalReading};
use crate::store::{StoreError, VitalsStore};

use super::alerts::{evaluate, AlertEvent};
use super::classify::{classify_reading, MetricStatus};
use super::escalation::{dispatch_escalation, EscalationOutcome, Notifier};
use super::score::{score_breakdown, ScoreBreakdown};

/// Everything the UI needs to render one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsAssessment {
    pub reading: VitalReading,
    pub statuses: Vec<MetricStatus>,
    pub score: ScoreBreakdown,
    pub alert: Option<AlertEvent>,
    /// Set only when the reading was ingested and escalation was attempted.
    pub escalation: Option<EscalationOutcome>,
}

pub struct VitalsMonitor<S: VitalsStore, N: Notifier> {
    store: S,
    notifier: N,
    config: MonitorConfig,
    live: Mutex<HashMap<String, VecDeque<VitalReading>>>,
    active: Mutex<HashMap<String, AlertEvent>>,
}

impl<S: VitalsStore, N: Notifier> VitalsMonitor<S, N> {
    pub fn new(store: S, notifier: N, config: MonitorConfig) -> Self {
        Self {
            store,
            notifier,
            config,
            live: Mutex::new(HashMap::new()),
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Persist a reading, evaluate it and escalate if needed.
    pub fn ingest(
        &self,
        user_id: &str,
        reading: VitalReading,
    ) -> Result<VitalsAssessment, StoreError> {
        // Held across the update: the live window and the active alert must
        // agree on the last ingested reading. Lock order is active, then live.
        let mut active = self.active.lock().map_err(|_| StoreError::LockFailed)?;

        self.store.insert_reading(user_id, reading.clone())?;

        let contacts = self.store.contacts(user_id)?;
        let mut assessment = derive(reading, primary_contact(&contacts).is_some());

        self.push_live(user_id, assessment.reading.clone())?;
        set_active(&mut active, user_id, assessment.alert.clone());
        drop(active);

        if let Some(alert) = &assessment.alert {
            if alert.is_critical() {
                tracing::warn!(
                    user_id,
                    metric = alert.metric.as_str(),
                    value = alert.value,
                    "Critical vital reading"
                );
            } else {
                tracing::info!(
                    user_id,
                    metric = alert.metric.as_str(),
                    value = alert.value,
                    "Vital reading out of range"
                );
            }
        }

        assessment.escalation = Some(dispatch_escalation(
            assessment.alert.as_ref(),
            &contacts,
            &self.notifier,
        ));
        Ok(assessment)
    }

    /// Evaluate a reading without storing it or notifying anyone.
    pub fn assess(
        &self,
        user_id: &str,
        reading: VitalReading,
    ) -> Result<VitalsAssessment, StoreError> {
        let contacts = self.store.contacts(user_id)?;
        Ok(derive(reading, primary_contact(&contacts).is_some()))
    }

    /// Assessment of the user's most recent stored reading.
    pub fn latest_assessment(&self, user_id: &str) -> Result<Option<VitalsAssessment>, StoreError> {
        match self.store.latest_reading(user_id)? {
            Some(reading) => self.assess(user_id, reading).map(Some),
            None => Ok(None),
        }
    }

    /// Rolling window of ingested readings, oldest first.
    pub fn live_history(&self, user_id: &str) -> Result<Vec<VitalReading>, StoreError> {
        let live = self.live.lock().map_err(|_| StoreError::LockFailed)?;
        Ok(live
            .get(user_id)
            .map(|window| window.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Alert raised by the last ingested reading, if it is still current.
    pub fn active_alert(&self, user_id: &str) -> Result<Option<AlertEvent>, StoreError> {
        let active = self.active.lock().map_err(|_| StoreError::LockFailed)?;
        Ok(active.get(user_id).cloned())
    }

    fn push_live(&self, user_id: &str, reading: VitalReading) -> Result<(), StoreError> {
        let mut live = self.live.lock().map_err(|_| StoreError::LockFailed)?;
        let window = live.entry(user_id.to_string()).or_default();
        window.push_back(reading);
        while window.len() > self.config.history_window {
            window.pop_front();
        }
        Ok(())
    }
}

fn derive(reading: VitalReading, has_primary_contact: bool) -> VitalsAssessment {
    VitalsAssessment {
        statuses: classify_reading(&reading),
        score: score_breakdown(&reading),
        alert: evaluate(&reading, has_primary_contact),
        escalation: None,
        reading,
    }
}

fn set_active(active: &mut HashMap<String, AlertEvent>, user_id: &str, alert: Option<AlertEvent>) {
    match alert {
        Some(alert) => {
            active.insert(user_id.to_string(), alert);
        }
        None => {
            if active.remove(user_id).is_some() {
                tracing::debug!(user_id, "Active alert cleared");
            }
        }
    }
}
