mod config;
mod rules;

pub use config::{PillarWeights, ScoringConfig, ScoringConfigError};

use serde::{Deserialize, Serialize};

use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, Pillar};
use super::summary;

/// Stateless evaluator that turns an answer set into a lifestyle score and insights.
///
/// Scoring never fails: missing, unknown, or undeclared answers simply earn no points.
#[derive(Debug, Clone)]
pub struct LifestyleScorer {
    catalog: QuestionCatalog,
    config: ScoringConfig,
}

impl LifestyleScorer {
    pub fn new(catalog: QuestionCatalog, config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        for pillar in Pillar::scored() {
            let possible: u32 = catalog
                .questions_for_pillar(pillar)
                .map(|question| u32::from(question.max_points()))
                .sum();
            if config.weights.weight(pillar) > 0 && possible == 0 {
                return Err(ScoringConfigError::EmptyPillar(pillar));
            }
        }
        Ok(Self { catalog, config })
    }

    pub fn standard() -> Self {
        Self {
            catalog: QuestionCatalog::standard(),
            config: ScoringConfig::default(),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, answers: &AnswerSet) -> LifestyleAssessment {
        let tallies = rules::tally_pillars(&self.catalog, answers);
        let score = rules::weighted_score(&tallies, &self.config.weights);
        let insights = rules::collect_insights(&self.catalog, answers, &self.config);

        LifestyleAssessment {
            score,
            pillars: tallies
                .into_iter()
                .map(|tally| tally.to_score(&self.config.weights))
                .collect(),
            insights,
        }
    }

    pub fn summarize(&self, answers: &AnswerSet) -> String {
        summary::compose(&self.score(answers))
    }

    /// Live score shown while the check-in is still in progress.
    ///
    /// Only answers the catalog accepts count toward the threshold.
    pub fn preview(&self, answers: &AnswerSet) -> Option<u8> {
        let assessment = self.score(answers);
        let accepted: usize = assessment.pillars.iter().map(|pillar| pillar.answered).sum();
        (accepted > self.config.preview_min_answers).then_some(assessment.score)
    }
}

impl Default for LifestyleScorer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Short observation triggered by a specific answer pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub key: &'static str,
    pub pillar: Pillar,
    pub message: String,
}

/// Points a single pillar contributed to the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub earned: u32,
    pub possible: u32,
    pub answered: usize,
    pub weight: u32,
    /// Every accepted answer in the pillar sits at its best option.
    pub at_best: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifestyleAssessment {
    pub score: u8,
    pub pillars: Vec<PillarScore>,
    pub insights: Vec<Insight>,
}

impl LifestyleAssessment {
    pub fn insight_messages(&self) -> Vec<String> {
        self.insights
            .iter()
            .map(|insight| insight.message.clone())
            .collect()
    }

    pub fn has_insight_for(&self, pillar: Pillar) -> bool {
        self.insights.iter().any(|insight| insight.pillar == pillar)
    }

    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.pillars.iter().find(|entry| entry.pillar == pillar)
    }

    pub fn summary(&self) -> String {
        summary::compose(self)
    }
}
