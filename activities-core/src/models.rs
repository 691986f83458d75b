use serde::{Deserialize, Serialize};

/// One extracurricular offering and its roster.
///
/// The name is not part of the record; it is the key the registry stores
/// the record under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>, // signup order, no duplicates
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for email in participants {
            let email = email.into();
            if !self.is_participant(&email) {
                self.participants.push(email);
            }
        }
        self
    }

    pub fn is_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Remaining capacity. Zero once the roster is at or over the cap.
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}
