use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier handed over by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Life dimension a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Diet,
    Activity,
    Sleep,
    Stress,
    General,
}

impl Pillar {
    /// Pillars that carry scoring weight, in reporting order.
    pub const fn scored() -> [Self; 4] {
        [Self::Diet, Self::Activity, Self::Sleep, Self::Stress]
    }

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Diet,
            Self::Activity,
            Self::Sleep,
            Self::Stress,
            Self::General,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Diet => "Diet & Nutrition",
            Self::Activity => "Physical Activity",
            Self::Sleep => "Sleep Quality",
            Self::Stress => "Stress Management",
            Self::General => "General Health",
        }
    }

    /// Lowercase noun used inside generated sentences.
    pub const fn topic(self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Activity => "activity",
            Self::Sleep => "sleep",
            Self::Stress => "stress",
            Self::General => "overall wellbeing",
        }
    }
}

/// Shape of the answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Scale { min: i64, max: i64 },
    Choice,
    YesNo,
}

/// Value recorded for a single question.
///
/// Serialized untagged so the persisted payload stays a plain JSON scalar per question.
/// Anything that is not a bool, integer, or string lands in `Other`, which no question
/// accepts, so a stray float or array never rejects the rest of the answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Scale(i64),
    Choice(String),
    Other(serde_json::Value),
}

impl AnswerValue {
    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn as_scale(&self) -> Option<i64> {
        match self {
            Self::Scale(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn matches_kind(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Scale(_), QuestionKind::Scale { .. })
                | (Self::Choice(_), QuestionKind::Choice)
                | (Self::Flag(_), QuestionKind::YesNo)
        )
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(value) => write!(f, "{value}"),
            Self::Scale(value) => write!(f, "{value}"),
            Self::Choice(value) => f.write_str(value),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    pub value: AnswerValue,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub pillar: Pillar,
    pub kind: QuestionKind,
    pub question: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn is_multiple_choice(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn value_for_label(&self, label: &str) -> Option<&AnswerValue> {
        self.options
            .iter()
            .find(|option| option.label == label)
            .map(|option| &option.value)
    }

    pub fn label_for_value(&self, value: &AnswerValue) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label)
    }

    /// Whether `value` may be stored for this question.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        self.points_for(value).is_some()
    }

    /// Points earned by `value`, or `None` when the value is not a declared answer.
    pub fn points_for(&self, value: &AnswerValue) -> Option<u8> {
        if self.is_multiple_choice() {
            return self
                .options
                .iter()
                .find(|option| &option.value == value)
                .map(|option| option.points);
        }

        match (self.kind, value) {
            (QuestionKind::Scale { min, max }, AnswerValue::Scale(raw))
                if (min..=max).contains(raw) =>
            {
                u8::try_from(raw - min).ok()
            }
            _ => None,
        }
    }

    pub fn max_points(&self) -> u8 {
        if self.is_multiple_choice() {
            return self
                .options
                .iter()
                .map(|option| option.points)
                .max()
                .unwrap_or(0);
        }

        match self.kind {
            QuestionKind::Scale { min, max } => u8::try_from(max - min).unwrap_or(0),
            QuestionKind::Choice | QuestionKind::YesNo => 0,
        }
    }

    /// Highest scoring answer; ties resolve to the first declared option.
    pub fn best_value(&self) -> Option<AnswerValue> {
        if self.is_multiple_choice() {
            let best = self.max_points();
            return self
                .options
                .iter()
                .find(|option| option.points == best)
                .map(|option| option.value.clone());
        }

        match self.kind {
            QuestionKind::Scale { max, .. } => Some(AnswerValue::Scale(max)),
            QuestionKind::Choice | QuestionKind::YesNo => None,
        }
    }

    /// Lowest scoring answer; ties resolve to the first declared option.
    pub fn worst_value(&self) -> Option<AnswerValue> {
        if self.is_multiple_choice() {
            let worst = self.options.iter().map(|option| option.points).min()?;
            return self
                .options
                .iter()
                .find(|option| option.points == worst)
                .map(|option| option.value.clone());
        }

        match self.kind {
            QuestionKind::Scale { min, .. } => Some(AnswerValue::Scale(min)),
            QuestionKind::Choice | QuestionKind::YesNo => None,
        }
    }
}

/// Answers collected during a check-in, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        self.0.insert(id.into(), value)
    }

    pub fn with(mut self, id: impl Into<String>, value: AnswerValue) -> Self {
        self.insert(id, value);
        self
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, AnswerValue>> for AnswerSet {
    fn from(value: BTreeMap<String, AnswerValue>) -> Self {
        Self(value)
    }
}
