use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, AnswerValue, UserId};
use super::scoring::LifestyleAssessment;

/// Row persisted once per user and calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub user_id: UserId,
    pub checkin_date: NaiveDate,
    pub lifestyle_score: u8,
    pub mood: Option<AnswerValue>,
    pub stress_level: Option<AnswerValue>,
    pub sleep_quality: Option<AnswerValue>,
    pub energy_level: Option<AnswerValue>,
    pub answers: AnswerSet,
    pub insights: Vec<String>,
}

impl CheckinRecord {
    pub fn from_assessment(
        user_id: UserId,
        checkin_date: NaiveDate,
        answers: AnswerSet,
        assessment: &LifestyleAssessment,
    ) -> Self {
        let mirror = |id: &str| answers.get(id).cloned();

        Self {
            user_id,
            checkin_date,
            lifestyle_score: assessment.score,
            mood: mirror("general_wellbeing"),
            stress_level: mirror("stress_level"),
            sleep_quality: mirror("sleep_quality"),
            energy_level: mirror("energy_level"),
            insights: assessment.insight_messages(),
            answers,
        }
    }

    pub fn key(&self) -> (UserId, NaiveDate) {
        (self.user_id.clone(), self.checkin_date)
    }
}
