use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{AnswerSet, UserId};
use super::gate::{checkin_date, CheckinAvailability};
use super::prompts::{select_prompts, HealthPrompt, PromptConfig};
use super::record::CheckinRecord;
use super::repository::{
    CheckinRepository, DailyReminder, InsertOutcome, ReminderScheduler, RepositoryError,
};
use super::scoring::{LifestyleAssessment, LifestyleScorer};
use super::session::{FinalizedAnswers, SessionError};

/// Schedule settings for the check-in window and its reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinSchedule {
    pub unlock_hour: u32,
    pub reminder_hour: u32,
    pub reminder_minute: u32,
}

impl Default for CheckinSchedule {
    fn default() -> Self {
        Self {
            unlock_hour: 18,
            reminder_hour: 20,
            reminder_minute: 0,
        }
    }
}

/// Result of a finished check-in, ready for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinCompletion {
    pub record: CheckinRecord,
    pub message: String,
}

/// Live score preview for an in-progress answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinPreview {
    pub assessment: LifestyleAssessment,
    pub message: String,
}

/// Service composing the scorer, the record store, and the reminder hook.
pub struct CheckinService<R, N> {
    repository: Arc<R>,
    reminders: Arc<N>,
    scorer: Arc<LifestyleScorer>,
    schedule: CheckinSchedule,
    prompt_config: PromptConfig,
}

impl<R, N> CheckinService<R, N>
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    pub fn new(
        repository: Arc<R>,
        reminders: Arc<N>,
        scorer: LifestyleScorer,
        schedule: CheckinSchedule,
    ) -> Self {
        Self {
            repository,
            reminders,
            scorer: Arc::new(scorer),
            schedule,
            prompt_config: PromptConfig::default(),
        }
    }

    pub fn with_prompt_config(mut self, prompt_config: PromptConfig) -> Self {
        self.prompt_config = prompt_config;
        self
    }

    pub fn scorer(&self) -> &LifestyleScorer {
        &self.scorer
    }

    pub fn schedule(&self) -> CheckinSchedule {
        self.schedule
    }

    /// Evaluates the gate for `now` and keeps the evening reminder scheduled while the
    /// day is still open.
    pub fn availability(
        &self,
        user_id: &UserId,
        now: NaiveDateTime,
    ) -> Result<CheckinAvailability, CheckinServiceError> {
        let today = checkin_date(now);
        let completed_today = self.repository.fetch(user_id, today)?.is_some();
        let availability =
            CheckinAvailability::evaluate(now, completed_today, self.schedule.unlock_hour);

        if availability != CheckinAvailability::Completed {
            let reminder =
                DailyReminder::evening(self.schedule.reminder_hour, self.schedule.reminder_minute);
            if let Err(err) = self.reminders.replace_daily(reminder) {
                warn!(user = %user_id, error = %err, "failed to schedule check-in reminder");
            }
        }

        debug!(user = %user_id, state = availability.label(), "evaluated check-in availability");
        Ok(availability)
    }

    pub fn preview(&self, answers: &AnswerSet) -> CheckinPreview {
        let assessment = self.scorer.score(answers);
        let message = assessment.summary();
        CheckinPreview {
            assessment,
            message,
        }
    }

    /// Validates a client-supplied answer set against the catalog.
    pub fn finalize(&self, answers: AnswerSet) -> Result<FinalizedAnswers, CheckinServiceError> {
        Ok(FinalizedAnswers::from_complete(self.scorer.catalog(), answers)?)
    }

    /// Scores a finished check-in and persists the day's record.
    ///
    /// Retrying with the same answers is idempotent; different answers for a day that is
    /// already stored are rejected.
    pub fn complete(
        &self,
        user_id: &UserId,
        answers: FinalizedAnswers,
        now: NaiveDateTime,
    ) -> Result<CheckinCompletion, CheckinServiceError> {
        let today = checkin_date(now);
        let existing = self.repository.fetch(user_id, today)?;
        let availability =
            CheckinAvailability::evaluate(now, existing.is_some(), self.schedule.unlock_hour);

        if let CheckinAvailability::Locked { unlocks_at } = availability {
            return Err(CheckinServiceError::Locked { unlocks_at });
        }

        let assessment = self.scorer.score(answers.answers());
        let message = assessment.summary();
        let record = CheckinRecord::from_assessment(
            user_id.clone(),
            today,
            answers.into_inner(),
            &assessment,
        );

        let stored = match self.repository.insert_new(record.clone())? {
            InsertOutcome::Inserted(stored) => stored,
            InsertOutcome::Existing(stored) if stored == record => {
                debug!(user = %user_id, date = %today, "check-in already stored; returning existing record");
                return Ok(CheckinCompletion {
                    record: stored,
                    message,
                });
            }
            InsertOutcome::Existing(_) => {
                return Err(CheckinServiceError::AlreadyCompleted { date: today });
            }
        };
        info!(
            user = %user_id,
            date = %today,
            score = stored.lifestyle_score,
            insights = stored.insights.len(),
            "daily check-in completed"
        );

        Ok(CheckinCompletion {
            record: stored,
            message,
        })
    }

    pub fn prompts(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<HealthPrompt>, CheckinServiceError> {
        let records = self.repository.recent(user_id, self.prompt_config.window)?;
        Ok(select_prompts(&records, today, &self.prompt_config))
    }
}

/// Error raised by the check-in service.
#[derive(Debug, thiserror::Error)]
pub enum CheckinServiceError {
    #[error("check-in opens at {unlocks_at}")]
    Locked { unlocks_at: NaiveDateTime },
    #[error("check-in for {date} was already completed with different answers")]
    AlreadyCompleted { date: NaiveDate },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
