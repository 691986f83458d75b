use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::{debug, info};

use crate::catalog::seed_activities;
use crate::errors::{RegistryError, RegistryResult};
use crate::models::Activity;

/// In-memory activity registry.
///
/// Activities are fixed once the registry is built. Each roster check and
/// mutation runs while holding that activity's entry lock, so two requests
/// racing to sign up the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct ActivityRegistry {
    activities: DashMap<String, Activity>,
}

impl ActivityRegistry {
    pub fn seeded() -> Self {
        Self::from_activities(seed_activities())
    }

    pub fn from_activities<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = (S, Activity)>,
        S: Into<String>,
    {
        let map = DashMap::new();
        for (name, activity) in activities {
            map.insert(name.into(), activity);
        }
        Self { activities: map }
    }

    /// Snapshot of every activity, ordered by name.
    pub fn list(&self) -> BTreeMap<String, Activity> {
        self.activities
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn get(&self, activity: &str) -> RegistryResult<Activity> {
        self.activities
            .get(activity)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RegistryError::ActivityNotFound(activity.to_string()))
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Adds `email` to the roster of `activity`.
    ///
    /// `max_participants` is not checked here.
    pub fn signup(&self, activity: &str, email: &str) -> RegistryResult<()> {
        let mut entry = self
            .activities
            .get_mut(activity)
            .ok_or_else(|| RegistryError::ActivityNotFound(activity.to_string()))?;

        if entry.is_participant(email) {
            debug!(activity = %activity, email = %email, "Rejected duplicate signup");
            return Err(RegistryError::AlreadySignedUp {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        }

        entry.participants.push(email.to_string());
        info!(activity = %activity, email = %email, "Signed up participant");
        Ok(())
    }

    pub fn unregister(&self, activity: &str, email: &str) -> RegistryResult<()> {
        let mut entry = self
            .activities
            .get_mut(activity)
            .ok_or_else(|| RegistryError::ActivityNotFound(activity.to_string()))?;

        let Some(position) = entry.participants.iter().position(|p| p == email) else {
            debug!(activity = %activity, email = %email, "Rejected unregister for absent participant");
            return Err(RegistryError::NotSignedUp {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        };

        entry.participants.remove(position);
        info!(activity = %activity, email = %email, "Unregistered participant");
        Ok(())
    }
}
