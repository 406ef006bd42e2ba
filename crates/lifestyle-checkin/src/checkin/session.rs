use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, AnswerValue, Question};
use super::scoring::LifestyleScorer;

/// Step-by-step traversal of the catalog for a single check-in.
///
/// The session owns the answers until the last question is answered; from then on the
/// answers are frozen inside [`FinalizedAnswers`] and the session rejects further input.
#[derive(Debug, Clone)]
pub struct CheckinSession<'a> {
    catalog: &'a QuestionCatalog,
    position: usize,
    answers: AnswerSet,
    finished: bool,
}

/// Outcome of submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep<'a> {
    Next(&'a Question),
    Finished(FinalizedAnswers),
}

/// Complete, read-only answer set produced by a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedAnswers(AnswerSet);

impl FinalizedAnswers {
    /// Wraps an answer set received from a client, requiring every catalog question.
    pub fn from_complete(
        catalog: &QuestionCatalog,
        answers: AnswerSet,
    ) -> Result<Self, SessionError> {
        let missing: Vec<&'static str> = catalog
            .questions()
            .iter()
            .filter(|question| !answers.contains(question.id))
            .map(|question| question.id)
            .collect();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete { missing });
        }

        for question in catalog.questions() {
            if let Some(value) = answers.get(question.id) {
                if !question.accepts(value) {
                    return Err(SessionError::InvalidAnswer {
                        question: question.id,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(Self(answers))
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.0
    }

    pub fn into_inner(self) -> AnswerSet {
        self.0
    }
}

impl<'a> CheckinSession<'a> {
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self {
            catalog,
            position: 0,
            answers: AnswerSet::new(),
            finished: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        if self.finished {
            return None;
        }
        self.catalog.questions().get(self.position)
    }

    /// Previously stored answer for the current question, if the user navigated back.
    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.current_question()
            .and_then(|question| self.answers.get(question.id))
    }

    pub fn is_first_question(&self) -> bool {
        self.position == 0
    }

    pub fn is_last_question(&self) -> bool {
        self.position + 1 >= self.catalog.len()
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.catalog.len();
        if self.finished || total == 0 {
            return 100;
        }
        (((self.position + 1) * 100) / total) as u8
    }

    pub fn answer(&mut self, value: AnswerValue) -> Result<SessionStep<'a>, SessionError> {
        let question = self.current_question().ok_or(SessionError::AlreadyFinished)?;
        if !question.accepts(&value) {
            return Err(SessionError::InvalidAnswer {
                question: question.id,
                value,
            });
        }

        self.answers.insert(question.id, value);

        if self.is_last_question() {
            self.finished = true;
            return Ok(SessionStep::Finished(FinalizedAnswers(self.answers.clone())));
        }

        self.position += 1;
        let next = self
            .catalog
            .questions()
            .get(self.position)
            .ok_or(SessionError::AlreadyFinished)?;
        Ok(SessionStep::Next(next))
    }

    /// Answers the current question by its display label.
    pub fn answer_label(&mut self, label: &str) -> Result<SessionStep<'a>, SessionError> {
        let question = self.current_question().ok_or(SessionError::AlreadyFinished)?;
        let value = question
            .value_for_label(label)
            .cloned()
            .ok_or_else(|| SessionError::UnknownLabel {
                question: question.id,
                label: label.to_string(),
            })?;
        self.answer(value)
    }

    /// Steps back one question, keeping the answers given so far.
    pub fn back(&mut self) -> Option<&'a Question> {
        if self.finished {
            return None;
        }
        if self.position > 0 {
            self.position -= 1;
        }
        self.current_question()
    }

    pub fn preview_score(&self, scorer: &LifestyleScorer) -> Option<u8> {
        scorer.preview(&self.answers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("check-in already finished")]
    AlreadyFinished,
    #[error("`{value}` is not a valid answer for `{question}`")]
    InvalidAnswer {
        question: &'static str,
        value: AnswerValue,
    },
    #[error("`{label}` is not an option of `{question}`")]
    UnknownLabel {
        question: &'static str,
        label: String,
    },
    #[error("check-in is missing answers for: {}", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
}
