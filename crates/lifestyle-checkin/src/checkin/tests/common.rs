use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::checkin::{
    checkin_router, AnswerSet, AnswerValue, CheckinRecord, CheckinRepository, CheckinSchedule,
    CheckinService, DailyReminder, InsertOutcome, LifestyleScorer, QuestionCatalog,
    ReminderError, ReminderScheduler, RepositoryError, UserId,
};

pub(super) fn catalog() -> QuestionCatalog {
    QuestionCatalog::standard()
}

pub(super) fn scorer() -> LifestyleScorer {
    LifestyleScorer::standard()
}

pub(super) fn user() -> UserId {
    UserId("user-42".to_string())
}

pub(super) fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

pub(super) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).expect("valid time")
}

pub(super) fn best_answers() -> AnswerSet {
    catalog()
        .questions()
        .iter()
        .map(|question| {
            (
                question.id.to_string(),
                question.best_value().expect("best value"),
            )
        })
        .collect()
}

pub(super) fn worst_answers() -> AnswerSet {
    catalog()
        .questions()
        .iter()
        .map(|question| {
            (
                question.id.to_string(),
                question.worst_value().expect("worst value"),
            )
        })
        .collect()
}

/// A realistic evening: decent food, short sleep, stressful day without a break.
pub(super) fn typical_answers() -> AnswerSet {
    AnswerSet::new()
        .with("meal_quality", AnswerValue::choice("mixed"))
        .with("vegetable_servings", AnswerValue::Scale(2))
        .with("sugary_drinks", AnswerValue::Flag(false))
        .with("exercise_minutes", AnswerValue::choice("under_30"))
        .with("steps_goal_met", AnswerValue::Flag(true))
        .with("sleep_hours", AnswerValue::choice("5_to_6"))
        .with("sleep_quality", AnswerValue::Scale(3))
        .with("stress_level", AnswerValue::Scale(4))
        .with("relaxation_practice", AnswerValue::Flag(false))
        .with("energy_level", AnswerValue::Scale(2))
        .with("general_wellbeing", AnswerValue::choice("okay"))
}

pub(super) fn record_for(
    date: NaiveDate,
    score: u8,
    stress: i64,
    sleep: i64,
    energy: i64,
) -> CheckinRecord {
    CheckinRecord {
        user_id: user(),
        checkin_date: date,
        lifestyle_score: score,
        mood: Some(AnswerValue::choice("okay")),
        stress_level: Some(AnswerValue::Scale(stress)),
        sleep_quality: Some(AnswerValue::Scale(sleep)),
        energy_level: Some(AnswerValue::Scale(energy)),
        answers: AnswerSet::new(),
        insights: Vec::new(),
    }
}

pub(super) fn build_service() -> (
    CheckinService<MemoryRepository, MemoryReminders>,
    Arc<MemoryRepository>,
    Arc<MemoryReminders>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let reminders = Arc::new(MemoryReminders::default());
    let service = CheckinService::new(
        repository.clone(),
        reminders.clone(),
        scorer(),
        CheckinSchedule::default(),
    );
    (service, repository, reminders)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<(UserId, NaiveDate), CheckinRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl CheckinRepository for MemoryRepository {
    fn upsert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.key(), record.clone());
        Ok(record)
    }

    fn insert_new(&self, record: CheckinRecord) -> Result<InsertOutcome, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(user_id.clone(), date)).cloned())
    }

    fn recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
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

#[derive(Default, Clone)]
pub(super) struct MemoryReminders {
    scheduled: Arc<Mutex<Vec<DailyReminder>>>,
}

impl MemoryReminders {
    pub(super) fn scheduled(&self) -> Vec<DailyReminder> {
        self.scheduled
            .lock()
            .expect("reminder mutex poisoned")
            .clone()
    }
}

impl ReminderScheduler for MemoryReminders {
    fn replace_daily(&self, reminder: DailyReminder) -> Result<(), ReminderError> {
        let mut guard = self.scheduled.lock().expect("reminder mutex poisoned");
        guard.clear();
        guard.push(reminder);
        Ok(())
    }
}

pub(super) struct DeniedReminders;

impl ReminderScheduler for DeniedReminders {
    fn replace_daily(&self, _reminder: DailyReminder) -> Result<(), ReminderError> {
        Err(ReminderError::PermissionDenied)
    }
}

/// Reads never see stored rows, as if another request committed between read and write.
#[derive(Default, Clone)]
pub(super) struct StaleReadRepository {
    pub(super) inner: MemoryRepository,
}

impl CheckinRepository for StaleReadRepository {
    fn upsert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        self.inner.upsert(record)
    }

    fn insert_new(&self, record: CheckinRecord) -> Result<InsertOutcome, RepositoryError> {
        self.inner.insert_new(record)
    }

    fn fetch(
        &self,
        _user_id: &UserId,
        _date: NaiveDate,
    ) -> Result<Option<CheckinRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, RepositoryError> {
        self.inner.recent(user_id, limit)
    }
}

pub(super) struct UnavailableRepository;

impl CheckinRepository for UnavailableRepository {
    fn upsert(&self, _record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_new(&self, _record: CheckinRecord) -> Result<InsertOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _user_id: &UserId,
        _date: NaiveDate,
    ) -> Result<Option<CheckinRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<CheckinRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: CheckinService<MemoryRepository, MemoryReminders>,
) -> axum::Router {
    checkin_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
