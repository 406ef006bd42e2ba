//! Data-driven conversation openers for the health assistant.
//!
//! Each rule inspects the user's most recent check-in records and, when its pattern holds,
//! produces a prompt whose opener references the observed data directly. Rules are pure and
//! evaluated independently; the output is ordered by priority and then by rule order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerValue, Pillar};
use super::record::CheckinRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthPrompt {
    pub key: &'static str,
    pub pillar: Pillar,
    pub priority: PromptPriority,
    pub title: String,
    pub opener: String,
}

/// Thresholds for pattern detection over recent check-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub window: usize,
    pub high_stress_level: i64,
    pub low_sleep_quality: i64,
    pub low_energy_level: i64,
    pub score_drop: u8,
    pub stale_after_days: i64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            window: 7,
            high_stress_level: 4,
            low_sleep_quality: 2,
            low_energy_level: 2,
            score_drop: 15,
            stale_after_days: 7,
        }
    }
}

fn mirror_at_or_above(value: &Option<AnswerValue>, threshold: i64) -> bool {
    value
        .as_ref()
        .and_then(AnswerValue::as_scale)
        .map(|level| level >= threshold)
        .unwrap_or(false)
}

fn mirror_at_or_below(value: &Option<AnswerValue>, threshold: i64) -> bool {
    value
        .as_ref()
        .and_then(AnswerValue::as_scale)
        .map(|level| level <= threshold)
        .unwrap_or(false)
}

pub fn select_prompts(
    records: &[CheckinRecord],
    today: NaiveDate,
    config: &PromptConfig,
) -> Vec<HealthPrompt> {
    let mut recent: Vec<&CheckinRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.checkin_date.cmp(&a.checkin_date));
    recent.truncate(config.window.max(1));

    let Some(latest) = recent.first() else {
        return Vec::new();
    };

    let mut prompts = Vec::new();

    let days_since = (today - latest.checkin_date).num_days();
    if days_since > config.stale_after_days {
        prompts.push(HealthPrompt {
            key: "stale_checkins",
            pillar: Pillar::General,
            priority: PromptPriority::Low,
            title: "Catch up on recent days".to_string(),
            opener: format!(
                "Your last check-in was {days_since} days ago, so I'm working from older data. How have the past few days been?"
            ),
        });
    }

    let last_three = &recent[..recent.len().min(3)];
    let stressed = last_three
        .iter()
        .filter(|record| mirror_at_or_above(&record.stress_level, config.high_stress_level))
        .count();
    if stressed >= 2 {
        prompts.push(HealthPrompt {
            key: "elevated_stress",
            pillar: Pillar::Stress,
            priority: PromptPriority::High,
            title: "Stress has been running high".to_string(),
            opener: format!(
                "Your stress was high on {stressed} of your last {} check-ins. Want to look at what's been driving it?",
                last_three.len()
            ),
        });
    }

    if recent.len() >= 2
        && recent[..2]
            .iter()
            .all(|record| mirror_at_or_below(&record.sleep_quality, config.low_sleep_quality))
    {
        prompts.push(HealthPrompt {
            key: "poor_sleep_streak",
            pillar: Pillar::Sleep,
            priority: PromptPriority::Medium,
            title: "Sleep quality keeps dipping".to_string(),
            opener: "Your sleep quality was low on each of your last 2 check-ins. Let's look at what might be disturbing your rest."
                .to_string(),
        });
    }

    let low_energy = recent
        .iter()
        .filter(|record| mirror_at_or_below(&record.energy_level, config.low_energy_level))
        .count();
    let energy_threshold = recent.len().div_ceil(2).max(2);
    if low_energy >= energy_threshold {
        prompts.push(HealthPrompt {
            key: "low_energy_pattern",
            pillar: Pillar::General,
            priority: PromptPriority::Medium,
            title: "Energy has been low".to_string(),
            opener: format!(
                "Low energy showed up in {low_energy} of your last {} check-ins. That pattern is worth unpacking together.",
                recent.len()
            ),
        });
    }

    let previous = &recent[1..];
    if previous.len() >= 2 {
        let total: u32 = previous
            .iter()
            .map(|record| u32::from(record.lifestyle_score))
            .sum();
        let average = total as f32 / previous.len() as f32;
        let latest_score = f32::from(latest.lifestyle_score);
        if average - latest_score >= f32::from(config.score_drop) {
            prompts.push(HealthPrompt {
                key: "score_drop",
                pillar: Pillar::General,
                priority: PromptPriority::High,
                title: "Your lifestyle score dropped".to_string(),
                opener: format!(
                    "Your lifestyle score fell to {} from a recent average of {:.0}. Something seems to have shifted; want to dig into it?",
                    latest.lifestyle_score, average
                ),
            });
        }
    }

    prompts.sort_by_key(|prompt| prompt.priority);
    prompts
}
