//! Activity model
//!
//! An extracurricular activity and its participant roster.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Extracurricular activity offered by the school.
///
/// `participants` keeps signup order and never holds the same email twice.
/// `max_participants` is informational only; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Activity {
    /// Activity name (unique key, serialized as the listing key)
    #[serde(skip)]
    pub name: String,
    pub description: String,
    /// Free-text schedule, e.g. "Fridays, 3:30 PM - 5:00 PM"
    pub schedule: String,
    pub max_participants: u32,
    /// Participant emails in signup order
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Builder-style helper for seeding participants
    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    /// Check if an email is on the roster
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}

/// Snapshot of the whole catalog.
///
/// Serializes as a JSON object keyed by activity name, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityListing(pub Vec<Activity>);

impl ActivityListing {
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ActivityListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for activity in &self.0 {
            map.serialize_entry(&activity.name, activity)?;
        }
        map.end()
    }
}
