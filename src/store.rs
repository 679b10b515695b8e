//! Persistence seam for readings and emergency contacts.
//!
//! The engine never talks to a database directly. Callers provide a
//! `VitalsStore`; `InMemoryVitalsStore` is the reference implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::models::{sort_contacts, EmergencyContact, VitalReading};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Lock acquisition failed")]
    LockFailed,
}

pub trait VitalsStore: Send + Sync {
    fn insert_reading(&self, user_id: &str, reading: VitalReading) -> Result<(), StoreError>;

    /// Most recent reading by `recorded_at`.
    fn latest_reading(&self, user_id: &str) -> Result<Option<VitalReading>, StoreError>;

    /// Readings oldest first. With a limit, only the most recent `limit`.
    fn history(&self, user_id: &str, limit: Option<usize>)
        -> Result<Vec<VitalReading>, StoreError>;

    /// Add a contact. The first contact added for a user becomes primary.
    fn add_contact(
        &self,
        user_id: &str,
        contact: EmergencyContact,
    ) -> Result<EmergencyContact, StoreError>;

    /// Contacts with the primary first.
    fn contacts(&self, user_id: &str) -> Result<Vec<EmergencyContact>, StoreError>;
}

#[derive(Default)]
struct UserRecords {
    readings: Vec<VitalReading>,
    contacts: Vec<EmergencyContact>,
}

/// Per-user readings and contacts behind one `RwLock`.
#[derive(Default)]
pub struct InMemoryVitalsStore {
    users: RwLock<HashMap<String, UserRecords>>,
}

impl InMemoryVitalsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VitalsStore for InMemoryVitalsStore {
    fn insert_reading(&self, user_id: &str, reading: VitalReading) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockFailed)?;
        let records = users.entry(user_id.to_string()).or_default();

        // Keep readings sorted by recorded_at; device readings can arrive late
        let pos = records
            .readings
            .partition_point(|r| r.recorded_at <= reading.recorded_at);

        tracing::debug!(
            user_id,
            reading_id = %reading.id,
            source = reading.source.as_str(),
            "Stored vital reading"
        );
        records.readings.insert(pos, reading);
        Ok(())
    }

    fn latest_reading(&self, user_id: &str) -> Result<Option<VitalReading>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockFailed)?;
        Ok(users
            .get(user_id)
            .and_then(|records| records.readings.last().cloned()))
    }

    fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<VitalReading>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockFailed)?;
        let Some(records) = users.get(user_id) else {
            return Ok(Vec::new());
        };

        let readings = &records.readings;
        let start = limit.map_or(0, |n| readings.len().saturating_sub(n));
        Ok(readings[start..].to_vec())
    }

    fn add_contact(
        &self,
        user_id: &str,
        mut contact: EmergencyContact,
    ) -> Result<EmergencyContact, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockFailed)?;
        let records = users.entry(user_id.to_string()).or_default();

        if records.contacts.is_empty() {
            contact.is_primary = true;
        } else if contact.is_primary {
            for existing in &mut records.contacts {
                existing.is_primary = false;
            }
        }

        tracing::debug!(user_id, primary = contact.is_primary, "Added emergency contact");
        records.contacts.push(contact.clone());
        Ok(contact)
    }

    fn contacts(&self, user_id: &str) -> Result<Vec<EmergencyContact>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockFailed)?;
        let mut contacts = users
            .get(user_id)
            .map(|records| records.contacts.clone())
            .unwrap_or_default();
        sort_contacts(&mut contacts);
        Ok(contacts)
    }
}
