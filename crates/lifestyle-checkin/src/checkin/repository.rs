use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::UserId;
use super::record::CheckinRecord;

/// Storage abstraction for daily check-in rows keyed by (user, date).
pub trait CheckinRepository: Send + Sync {
    /// Inserts or replaces the record for its (user, date) key.
    fn upsert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError>;
    /// Stores `record` only when its (user, date) key is free, in one atomic step.
    fn insert_new(&self, record: CheckinRecord) -> Result<InsertOutcome, RepositoryError>;
    fn fetch(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckinRecord>, RepositoryError>;
    /// Most recent records first.
    fn recent(&self, user_id: &UserId, limit: usize)
        -> Result<Vec<CheckinRecord>, RepositoryError>;
}

/// Result of [`CheckinRepository::insert_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(CheckinRecord),
    /// The key was already taken; carries the record that holds it.
    Existing(CheckinRecord),
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the device's local notification scheduler.
pub trait ReminderScheduler: Send + Sync {
    /// Replaces any pending daily reminder with `reminder`.
    fn replace_daily(&self, reminder: DailyReminder) -> Result<(), ReminderError>;
}

/// Daily repeating reminder nudging the user to check in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReminder {
    pub hour: u32,
    pub minute: u32,
    pub title: String,
    pub body: String,
}

impl DailyReminder {
    pub fn evening(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            title: "Time to check in!".to_string(),
            body: "How did your day go? Log your lifestyle stats now.".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("notification permission denied")]
    PermissionDenied,
    #[error("reminder scheduler unavailable: {0}")]
    Unavailable(String),
}
