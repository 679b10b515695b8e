use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Someone to notify when a reading escalates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub relationship: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
}

impl EmergencyContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            relationship: None,
            email: None,
            is_primary: false,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

/// The first contact flagged primary, if any.
pub fn primary_contact(contacts: &[EmergencyContact]) -> Option<&EmergencyContact> {
    contacts.iter().find(|c| c.is_primary)
}

/// Primary contacts first, otherwise insertion order.
pub fn sort_contacts(contacts: &mut [EmergencyContact]) {
    contacts.sort_by_key(|c| !c.is_primary);
}
