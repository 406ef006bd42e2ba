use super::super::catalog::QuestionCatalog;
use super::super::domain::{AnswerSet, AnswerValue, Pillar};
use super::config::{PillarWeights, ScoringConfig};
use super::{Insight, PillarScore};

/// Points gathered for one pillar from the accepted answers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PillarTally {
    pub pillar: Pillar,
    pub earned: u32,
    pub max: u32,
    pub answered: usize,
    pub all_best: bool,
}

impl PillarTally {
    pub(crate) fn to_score(self, weights: &PillarWeights) -> PillarScore {
        PillarScore {
            pillar: self.pillar,
            earned: self.earned,
            possible: self.max,
            answered: self.answered,
            weight: weights.weight(self.pillar),
            at_best: self.all_best,
        }
    }
}

pub(crate) fn tally_pillars(catalog: &QuestionCatalog, answers: &AnswerSet) -> Vec<PillarTally> {
    Pillar::ordered()
        .into_iter()
        .map(|pillar| {
            let mut tally = PillarTally {
                pillar,
                earned: 0,
                max: 0,
                answered: 0,
                all_best: true,
            };

            for question in catalog.questions_for_pillar(pillar) {
                let max = question.max_points();
                tally.max += u32::from(max);

                let points = answers
                    .get(question.id)
                    .and_then(|value| question.points_for(value));
                if let Some(points) = points {
                    tally.earned += u32::from(points);
                    tally.answered += 1;
                    tally.all_best &= points == max;
                }
            }

            tally.all_best &= tally.answered > 0;
            tally
        })
        .collect()
}

/// Combines pillar ratios into a 0..=100 score using exact integer arithmetic.
///
/// `round(Σ weight · earned / max)` is evaluated over the product of all pillar maxima so
/// an all-best answer set lands on exactly 100.
pub(crate) fn weighted_score(tallies: &[PillarTally], weights: &PillarWeights) -> u8 {
    let scored: Vec<&PillarTally> = tallies
        .iter()
        .filter(|tally| weights.weight(tally.pillar) > 0 && tally.max > 0)
        .collect();

    let denominator: u128 = scored.iter().map(|tally| u128::from(tally.max)).product();
    if denominator == 0 {
        return 0;
    }

    let numerator: u128 = scored
        .iter()
        .map(|tally| {
            let weight = u128::from(weights.weight(tally.pillar));
            weight * u128::from(tally.earned) * (denominator / u128::from(tally.max))
        })
        .sum();

    let rounded = (2 * numerator + denominator) / (2 * denominator);
    rounded.min(100) as u8
}

/// Returns the stored value for `id` only when the catalog would accept it.
fn accepted<'a>(
    catalog: &QuestionCatalog,
    answers: &'a AnswerSet,
    id: &str,
) -> Option<&'a AnswerValue> {
    let question = catalog.question(id)?;
    answers.get(id).filter(|value| question.accepts(value))
}

pub(crate) fn collect_insights(
    catalog: &QuestionCatalog,
    answers: &AnswerSet,
    config: &ScoringConfig,
) -> Vec<Insight> {
    let mut insights = Vec::new();
    let mut emit = |key: &'static str, pillar: Pillar, message: String| {
        insights.push(Insight {
            key,
            pillar,
            message,
        });
    };

    let meal_quality = accepted(catalog, answers, "meal_quality").and_then(AnswerValue::as_choice);
    let vegetables = accepted(catalog, answers, "vegetable_servings").and_then(AnswerValue::as_scale);
    let sugary_drinks = accepted(catalog, answers, "sugary_drinks").and_then(AnswerValue::as_flag);
    let exercise = accepted(catalog, answers, "exercise_minutes").and_then(AnswerValue::as_choice);
    let steps_goal_met = accepted(catalog, answers, "steps_goal_met").and_then(AnswerValue::as_flag);
    let sleep_hours = accepted(catalog, answers, "sleep_hours").and_then(AnswerValue::as_choice);
    let sleep_quality = accepted(catalog, answers, "sleep_quality").and_then(AnswerValue::as_scale);
    let stress_level = accepted(catalog, answers, "stress_level").and_then(AnswerValue::as_scale);
    let relaxation = accepted(catalog, answers, "relaxation_practice").and_then(AnswerValue::as_flag);
    let energy_level = accepted(catalog, answers, "energy_level").and_then(AnswerValue::as_scale);

    if meal_quality == Some("processed") {
        emit(
            "processed_meals",
            Pillar::Diet,
            "Most of today's meals were processed. Swapping one for a whole-food meal tomorrow is an easy win."
                .to_string(),
        );
    }

    if let Some(servings) = vegetables {
        if servings < config.min_vegetable_servings {
            emit(
                "low_vegetables",
                Pillar::Diet,
                format!(
                    "You had {servings} serving{} of vegetables, below the {} a day that supports steady energy.",
                    if servings == 1 { "" } else { "s" },
                    config.min_vegetable_servings
                ),
            );
        }
    }

    if sugary_drinks == Some(true) {
        emit(
            "sugary_drinks",
            Pillar::Diet,
            "Sugary drinks showed up today. Water or unsweetened tea cuts hidden sugar.".to_string(),
        );
    }

    if exercise == Some("none") {
        emit(
            "no_exercise",
            Pillar::Activity,
            "No physical activity was logged today. Even a 10-minute walk helps.".to_string(),
        );
    }

    if steps_goal_met == Some(false) {
        emit(
            "steps_missed",
            Pillar::Activity,
            "You missed your step goal today.".to_string(),
        );
    }

    let short_sleep = matches!(sleep_hours, Some("under_5" | "5_to_6"));
    if short_sleep {
        emit(
            "short_sleep",
            Pillar::Sleep,
            "You slept under 6 hours. Short sleep tends to raise stress and lower energy the next day."
                .to_string(),
        );
    } else if sleep_hours == Some("over_9") {
        emit(
            "long_sleep",
            Pillar::Sleep,
            "You slept over 9 hours. Regularly long sleep can mean your rest isn't restorative."
                .to_string(),
        );
    }

    let low_sleep_quality = sleep_quality
        .map(|quality| quality <= config.low_sleep_quality_threshold)
        .unwrap_or(false);
    if low_sleep_quality {
        emit(
            "low_sleep_quality",
            Pillar::Sleep,
            "Your sleep quality was low. A consistent wind-down routine may help.".to_string(),
        );
    }

    let high_stress = stress_level
        .map(|level| level >= config.high_stress_threshold)
        .unwrap_or(false);
    if high_stress {
        emit(
            "high_stress",
            Pillar::Stress,
            "Your stress level was high today.".to_string(),
        );
    }

    if high_stress && relaxation == Some(false) {
        emit(
            "no_relaxation_under_stress",
            Pillar::Stress,
            "You didn't take time to unwind on a high-stress day. Try a few minutes of slow breathing tonight."
                .to_string(),
        );
    }

    let low_energy = energy_level
        .map(|level| level <= config.low_energy_threshold)
        .unwrap_or(false);
    if low_energy && (short_sleep || low_sleep_quality) {
        emit(
            "low_energy_after_poor_sleep",
            Pillar::General,
            "Low energy today may be linked to poor sleep last night.".to_string(),
        );
    }

    insights
}
