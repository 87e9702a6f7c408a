//! Activity catalog service
//!
//! Holds the fixed set of activities and their rosters in memory. The set of
//! activities never changes at runtime; only participant lists do.

use tokio::sync::RwLock;

use crate::models::{Activity, ActivityListing};

/// Error types for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No activity with the given name
    #[error("Activity not found")]
    ActivityNotFound(String),

    /// Email is already on the roster
    #[error("Student is already signed up")]
    AlreadySignedUp { activity: String, email: String },

    /// Email is not on the roster
    #[error("Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },
}

/// In-memory activity catalog
pub struct ActivityCatalog {
    activities: RwLock<Vec<Activity>>,
}

impl ActivityCatalog {
    /// Create a catalog from an explicit list of activities
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Create the catalog with the school's standard activities
    pub fn seeded() -> Self {
        Self::new(default_activities())
    }

    /// Snapshot of every activity, in catalog order
    pub async fn list(&self) -> ActivityListing {
        ActivityListing(self.activities.read().await.clone())
    }

    /// Snapshot of a single activity
    pub async fn get(&self, activity_name: &str) -> Option<Activity> {
        self.activities
            .read()
            .await
            .iter()
            .find(|a| a.name == activity_name)
            .cloned()
    }

    /// Append a student to an activity's roster.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if no activity has this name
    /// - `AlreadySignedUp` if the email is already on the roster
    ///
    /// `max_participants` is not checked.
    pub async fn signup(&self, activity_name: &str, email: &str) -> Result<String, CatalogError> {
        let mut activities = self.activities.write().await;
        let activity = find_mut(&mut activities, activity_name)?;

        if activity.has_participant(email) {
            return Err(CatalogError::AlreadySignedUp {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        activity.participants.push(email.to_string());
        tracing::info!("Signed up {} for {}", email, activity_name);
        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Remove a student from an activity's roster.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if no activity has this name
    /// - `NotSignedUp` if the email is not on the roster
    pub async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<String, CatalogError> {
        let mut activities = self.activities.write().await;
        let activity = find_mut(&mut activities, activity_name)?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| CatalogError::NotSignedUp {
                activity: activity_name.to_string(),
                email: email.to_string(),
            })?;

        activity.participants.remove(position);
        tracing::info!("Unregistered {} from {}", email, activity_name);
        Ok(format!("Unregistered {} from {}", email, activity_name))
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn find_mut<'a>(
    activities: &'a mut [Activity],
    activity_name: &str,
) -> Result<&'a mut Activity, CatalogError> {
    activities
        .iter_mut()
        .find(|a| a.name == activity_name)
        .ok_or_else(|| CatalogError::ActivityNotFound(activity_name.to_string()))
}

/// The activities every fresh process starts with
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        )
        .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        Activity::new(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
        )
        .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        Activity::new(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
        )
        .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        Activity::new(
            "Soccer Team",
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
        )
        .with_participants(["liam@mergington.edu", "noah@mergington.edu"]),
        Activity::new(
            "Basketball Team",
            "Practice and play basketball with the school team",
            "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
            15,
        )
        .with_participants(["ava@mergington.edu", "mia@mergington.edu"]),
        Activity::new(
            "Art Club",
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
        )
        .with_participants(["amelia@mergington.edu", "harper@mergington.edu"]),
        Activity::new(
            "Drama Club",
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
        )
        .with_participants(["ella@mergington.edu", "scarlett@mergington.edu"]),
        Activity::new(
            "Math Club",
            "Solve challenging problems and participate in math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            10,
        )
        .with_participants(["james@mergington.edu", "benjamin@mergington.edu"]),
        Activity::new(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
        )
        .with_participants(["charlotte@mergington.edu", "henry@mergington.edu"]),
    ]
}
