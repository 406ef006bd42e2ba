use chrono::{NaiveDate, NaiveDateTime};
use lifestyle_checkin::checkin::{
    CheckinRecord, CheckinRepository, DailyReminder, InsertOutcome, ReminderError,
    ReminderScheduler, RepositoryError, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local record store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCheckinRepository {
    records: Arc<Mutex<HashMap<(UserId, NaiveDate), CheckinRecord>>>,
}

fn poisoned(_: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable("record store lock poisoned".to_string())
}

impl CheckinRepository for InMemoryCheckinRepository {
    fn upsert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.insert(record.key(), record.clone());
        Ok(record)
    }

    fn insert_new(&self, record: CheckinRecord) -> Result<InsertOutcome, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        match guard.entry(record.key()) {
            Entry::Occupied(existing) => Ok(InsertOutcome::Existing(existing.get().clone())),
            Entry::Vacant(slot) => Ok(InsertOutcome::Inserted(slot.insert(record).clone())),
        }
    }

    fn fetch(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(&(user_id.clone(), date)).cloned())
    }

    fn recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        let mut records: Vec<CheckinRecord> = guard
            .values()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.checkin_date.cmp(&a.checkin_date));
        records.truncate(limit);
        Ok(records)
    }
}

/// Holds the single pending daily reminder instead of talking to a device.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReminderScheduler {
    pending: Arc<Mutex<Option<DailyReminder>>>,
}

impl ReminderScheduler for InMemoryReminderScheduler {
    fn replace_daily(&self, reminder: DailyReminder) -> Result<(), ReminderError> {
        let mut guard = self
            .pending
            .lock()
            .map_err(|_| ReminderError::Unavailable("reminder lock poisoned".to_string()))?;
        debug!(hour = reminder.hour, minute = reminder.minute, "daily reminder replaced");
        *guard = Some(reminder);
        Ok(())
    }
}

impl InMemoryReminderScheduler {
    pub(crate) fn pending(&self) -> Option<DailyReminder> {
        self.pending.lock().ok().and_then(|guard| guard.clone())
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS] ({err})"))
}
