use std::collections::HashSet;

use super::domain::{AnswerOption, AnswerValue, Pillar, Question, QuestionKind};

/// Ordered, immutable set of daily check-in questions.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    /// Builds a catalog from custom questions, rejecting duplicates and ambiguous options.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let catalog = Self { questions };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions_for_pillar(&self, pillar: Pillar) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.pillar == pillar)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }

            if let QuestionKind::Scale { min, max } = question.kind {
                if min > max {
                    return Err(CatalogError::InvalidRange {
                        question: question.id,
                        min,
                        max,
                    });
                }
            }

            let mut labels = HashSet::new();
            let mut values: Vec<&AnswerValue> = Vec::new();
            for option in &question.options {
                if !option.value.matches_kind(question.kind) {
                    return Err(CatalogError::KindMismatch {
                        question: question.id,
                        label: option.label,
                    });
                }
                if !labels.insert(option.label) {
                    return Err(CatalogError::DuplicateLabel {
                        question: question.id,
                        label: option.label,
                    });
                }
                if values.contains(&&option.value) {
                    return Err(CatalogError::DuplicateValue {
                        question: question.id,
                        value: option.value.to_string(),
                    });
                }
                values.push(&option.value);
            }

            if !question.is_multiple_choice()
                && !matches!(question.kind, QuestionKind::Scale { .. })
            {
                return Err(CatalogError::MissingOptions(question.id));
            }
        }
        Ok(())
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("question id `{0}` appears more than once")]
    DuplicateQuestion(&'static str),
    #[error("question `{question}` repeats option label `{label}`")]
    DuplicateLabel {
        question: &'static str,
        label: &'static str,
    },
    #[error("question `{question}` repeats option value `{value}`")]
    DuplicateValue {
        question: &'static str,
        value: String,
    },
    #[error("option `{label}` of question `{question}` does not match the question kind")]
    KindMismatch {
        question: &'static str,
        label: &'static str,
    },
    #[error("question `{question}` has an empty range {min}..={max}")]
    InvalidRange {
        question: &'static str,
        min: i64,
        max: i64,
    },
    #[error("question `{0}` needs options to be answerable")]
    MissingOptions(&'static str),
}

fn option(label: &'static str, value: AnswerValue, points: u8) -> AnswerOption {
    AnswerOption {
        label,
        value,
        points,
    }
}

fn choice(label: &'static str, value: &'static str, points: u8) -> AnswerOption {
    option(label, AnswerValue::choice(value), points)
}

fn scale(label: &'static str, value: i64, points: u8) -> AnswerOption {
    option(label, AnswerValue::Scale(value), points)
}

fn yes_no(yes_points: u8, no_points: u8) -> Vec<AnswerOption> {
    vec![
        option("Yes", AnswerValue::Flag(true), yes_points),
        option("No", AnswerValue::Flag(false), no_points),
    ]
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: "meal_quality",
            pillar: Pillar::Diet,
            kind: QuestionKind::Choice,
            question: "What did most of your meals look like today?",
            help_text: Some("Think about breakfast, lunch, and dinner together."),
            options: vec![
                choice("Mostly processed", "processed", 0),
                choice("A mix of both", "mixed", 1),
                choice("Mostly whole foods", "whole_foods", 2),
            ],
        },
        Question {
            id: "vegetable_servings",
            pillar: Pillar::Diet,
            kind: QuestionKind::Scale { min: 0, max: 5 },
            question: "How many servings of vegetables did you eat?",
            help_text: Some("One serving is roughly a cupped handful. Enter 5 for five or more."),
            options: Vec::new(),
        },
        Question {
            id: "sugary_drinks",
            pillar: Pillar::Diet,
            kind: QuestionKind::YesNo,
            question: "Did you have any sugary drinks today?",
            help_text: None,
            options: yes_no(0, 1),
        },
        Question {
            id: "exercise_minutes",
            pillar: Pillar::Activity,
            kind: QuestionKind::Choice,
            question: "How long were you physically active today?",
            help_text: Some("Count walks, workouts, sports, or active chores."),
            options: vec![
                choice("None", "none", 0),
                choice("Under 30 minutes", "under_30", 1),
                choice("30-60 minutes", "30_to_60", 2),
                choice("Over 60 minutes", "over_60", 3),
            ],
        },
        Question {
            id: "steps_goal_met",
            pillar: Pillar::Activity,
            kind: QuestionKind::YesNo,
            question: "Did you reach your step goal?",
            help_text: None,
            options: yes_no(1, 0),
        },
        Question {
            id: "sleep_hours",
            pillar: Pillar::Sleep,
            kind: QuestionKind::Choice,
            question: "How many hours did you sleep last night?",
            help_text: None,
            options: vec![
                choice("Under 5 hours", "under_5", 0),
                choice("5-6 hours", "5_to_6", 1),
                choice("6-7 hours", "6_to_7", 2),
                choice("7-9 hours", "7_to_9", 3),
                choice("Over 9 hours", "over_9", 2),
            ],
        },
        Question {
            id: "sleep_quality",
            pillar: Pillar::Sleep,
            kind: QuestionKind::Scale { min: 1, max: 5 },
            question: "How would you rate your sleep quality?",
            help_text: Some("Did you wake up feeling rested?"),
            options: vec![
                scale("Very poor", 1, 0),
                scale("Poor", 2, 1),
                scale("Fair", 3, 2),
                scale("Good", 4, 3),
                scale("Excellent", 5, 4),
            ],
        },
        Question {
            id: "stress_level",
            pillar: Pillar::Stress,
            kind: QuestionKind::Scale { min: 1, max: 5 },
            question: "How stressed did you feel today?",
            help_text: None,
            options: vec![
                scale("Very low", 1, 4),
                scale("Low", 2, 3),
                scale("Moderate", 3, 2),
                scale("High", 4, 1),
                scale("Very high", 5, 0),
            ],
        },
        Question {
            id: "relaxation_practice",
            pillar: Pillar::Stress,
            kind: QuestionKind::YesNo,
            question: "Did you take time to relax or unwind?",
            help_text: Some("Breathing exercises, meditation, a quiet walk, or time offline all count."),
            options: yes_no(1, 0),
        },
        Question {
            id: "energy_level",
            pillar: Pillar::General,
            kind: QuestionKind::Scale { min: 1, max: 5 },
            question: "How was your energy throughout the day?",
            help_text: None,
            options: vec![
                scale("Exhausted", 1, 0),
                scale("Low", 2, 1),
                scale("Okay", 3, 2),
                scale("Good", 4, 3),
                scale("Energized", 5, 4),
            ],
        },
        Question {
            id: "general_wellbeing",
            pillar: Pillar::General,
            kind: QuestionKind::Choice,
            question: "Overall, how are you feeling?",
            help_text: None,
            options: vec![
                choice("Struggling", "struggling", 0),
                choice("Okay", "okay", 1),
                choice("Good", "good", 2),
                choice("Great", "great", 3),
            ],
        },
    ]
}
