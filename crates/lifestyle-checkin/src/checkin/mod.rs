//! Daily lifestyle check-in: question catalog, scoring, insights, and the check-in flow.
//!
//! [`score`] and [`summarize`] are pure functions over an [`AnswerSet`]; they never fail and
//! never touch I/O, so they can be called for live previews as well as on completion. The
//! [`CheckinService`] wraps them with the availability gate and the persistence and reminder
//! collaborators.

pub mod catalog;
pub mod domain;
pub mod gate;
pub mod prompts;
pub mod record;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
mod summary;

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

pub use catalog::{CatalogError, QuestionCatalog};
pub use domain::{AnswerOption, AnswerSet, AnswerValue, Pillar, Question, QuestionKind, UserId};
pub use gate::{checkin_date, CheckinAvailability, LATEST_UNLOCK_HOUR};
pub use prompts::{select_prompts, HealthPrompt, PromptConfig, PromptPriority};
pub use record::CheckinRecord;
pub use repository::{
    CheckinRepository, DailyReminder, InsertOutcome, ReminderError, ReminderScheduler,
    RepositoryError,
};
pub use router::checkin_router;
pub use scoring::{
    Insight, LifestyleAssessment, LifestyleScorer, PillarScore, PillarWeights, ScoringConfig,
    ScoringConfigError,
};
pub use service::{
    CheckinCompletion, CheckinPreview, CheckinSchedule, CheckinService, CheckinServiceError,
};
pub use session::{CheckinSession, FinalizedAnswers, SessionError, SessionStep};

fn standard_scorer() -> &'static LifestyleScorer {
    static SCORER: OnceLock<LifestyleScorer> = OnceLock::new();
    SCORER.get_or_init(LifestyleScorer::standard)
}

/// Scores `answers` against the standard catalog and weights.
pub fn score(answers: &AnswerSet) -> LifestyleAssessment {
    standard_scorer().score(answers)
}

/// Summary message for the completion screen, consistent with [`score`]'s insights.
pub fn summarize(answers: &AnswerSet) -> String {
    standard_scorer().summarize(answers)
}
