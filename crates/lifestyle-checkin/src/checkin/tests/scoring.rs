use super::common::*;
use crate::checkin::{
    score, summarize, AnswerSet, AnswerValue, LifestyleScorer, Pillar, PillarWeights,
    QuestionCatalog, ScoringConfig, ScoringConfigError,
};

fn insight_keys(answers: &AnswerSet) -> Vec<&'static str> {
    score(answers)
        .insights
        .iter()
        .map(|insight| insight.key)
        .collect()
}

/// Every alternative answer for a question, paired with its points.
fn candidate_values(catalog: &QuestionCatalog, id: &str) -> Vec<(AnswerValue, u8)> {
    let question = catalog.question(id).expect("question exists");
    if question.is_multiple_choice() {
        return question
            .options
            .iter()
            .map(|option| (option.value.clone(), option.points))
            .collect();
    }
    (0..=5)
        .map(|servings| {
            let value = AnswerValue::Scale(servings);
            let points = question.points_for(&value).expect("in range");
            (value, points)
        })
        .collect()
}

#[test]
fn best_answers_score_one_hundred() {
    let assessment = score(&best_answers());
    assert_eq!(assessment.score, 100);
    assert!(assessment.insights.is_empty());
}

#[test]
fn worst_answers_score_zero() {
    assert_eq!(score(&worst_answers()).score, 0);
}

#[test]
fn empty_answers_score_zero_without_insights() {
    let assessment = score(&AnswerSet::new());
    assert_eq!(assessment.score, 0);
    assert!(assessment.insights.is_empty());
    assert!(assessment.pillars.iter().all(|pillar| pillar.answered == 0));
}

#[test]
fn omission_never_scores_below_worst_explicit_answer() {
    let catalog = catalog();
    for base in [AnswerSet::new(), typical_answers(), best_answers()] {
        for question in catalog.questions() {
            let mut without = base.clone();
            without.remove(question.id);
            let mut with_worst = without.clone();
            with_worst.insert(question.id, question.worst_value().expect("worst value"));

            assert!(
                score(&without).score >= score(&with_worst).score,
                "omitting {} scored below its worst answer",
                question.id
            );
        }
    }
}

#[test]
fn scoring_and_summary_are_deterministic() {
    let answers = typical_answers();
    assert_eq!(score(&answers), score(&answers));
    assert_eq!(summarize(&answers), summarize(&answers));

    let first = serde_json::to_vec(&score(&answers)).expect("serializes");
    let second = serde_json::to_vec(&score(&answers)).expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn low_sleep_quality_alone_only_raises_sleep_insights() {
    let mut answers = best_answers();
    answers.insert("sleep_quality", AnswerValue::Scale(1));

    let assessment = score(&answers);

    assert!(assessment.has_insight_for(Pillar::Sleep));
    assert!(!assessment.has_insight_for(Pillar::Diet));
    assert!(!assessment.has_insight_for(Pillar::Activity));
    assert_eq!(insight_keys(&answers), vec!["low_sleep_quality"]);
}

#[test]
fn unknown_identifiers_are_ignored() {
    let answers = typical_answers();
    let with_unknown = answers
        .clone()
        .with("water_glasses", AnswerValue::Scale(8))
        .with("mood_emoji", AnswerValue::choice("sunny"));

    assert_eq!(score(&answers), score(&with_unknown));
    assert_eq!(summarize(&answers), summarize(&with_unknown));
}

#[test]
fn better_answer_never_lowers_score() {
    let catalog = catalog();
    let base = typical_answers();

    for question in catalog.questions() {
        let candidates = candidate_values(&catalog, question.id);
        for (worse, worse_points) in &candidates {
            for (better, better_points) in &candidates {
                if better_points <= worse_points {
                    continue;
                }
                let low = base.clone().with(question.id, worse.clone());
                let high = base.clone().with(question.id, better.clone());
                assert!(
                    score(&high).score >= score(&low).score,
                    "{}: {better} scored below {worse}",
                    question.id
                );
            }
        }
    }
}

#[test]
fn typical_day_scores_and_flags_expected_patterns() {
    let answers = typical_answers();
    let assessment = score(&answers);

    assert_eq!(assessment.score, 41);
    assert_eq!(
        insight_keys(&answers),
        vec![
            "low_vegetables",
            "short_sleep",
            "high_stress",
            "no_relaxation_under_stress",
            "low_energy_after_poor_sleep",
        ]
    );

    let sleep = assessment.pillar(Pillar::Sleep).expect("sleep pillar");
    assert_eq!((sleep.earned, sleep.possible, sleep.weight), (3, 7, 25));
    let general = assessment.pillar(Pillar::General).expect("general pillar");
    assert_eq!(general.weight, 0);
}

#[test]
fn partial_answers_score_only_what_is_present() {
    let answers = AnswerSet::new()
        .with("sleep_hours", AnswerValue::choice("7_to_9"))
        .with("sleep_quality", AnswerValue::Scale(5));

    assert_eq!(score(&answers).score, 25);
}

#[test]
fn general_questions_do_not_move_the_score() {
    let mut answers = best_answers();
    answers.insert("energy_level", AnswerValue::Scale(1));
    answers.insert("general_wellbeing", AnswerValue::choice("struggling"));

    assert_eq!(score(&answers).score, 100);
}

#[test]
fn undeclared_values_contribute_nothing_and_raise_no_insight() {
    let base = AnswerSet::new().with("vegetable_servings", AnswerValue::Scale(4));
    let malformed = base
        .clone()
        .with("meal_quality", AnswerValue::choice("pizza"))
        .with("stress_level", AnswerValue::choice("high"))
        .with("sleep_quality", AnswerValue::Scale(0));

    assert_eq!(score(&base), score(&malformed));

    let out_of_range = AnswerSet::new().with("vegetable_servings", AnswerValue::Scale(9));
    assert_eq!(score(&out_of_range).score, 0);
    assert!(score(&out_of_range).insights.is_empty());
}

#[test]
fn short_and_long_sleep_are_mutually_exclusive() {
    let short = AnswerSet::new().with("sleep_hours", AnswerValue::choice("under_5"));
    let long = AnswerSet::new().with("sleep_hours", AnswerValue::choice("over_9"));

    assert_eq!(insight_keys(&short), vec!["short_sleep"]);
    assert_eq!(insight_keys(&long), vec!["long_sleep"]);
}

#[test]
fn relaxation_insight_needs_high_stress() {
    let calm = AnswerSet::new()
        .with("stress_level", AnswerValue::Scale(2))
        .with("relaxation_practice", AnswerValue::Flag(false));
    assert!(insight_keys(&calm).is_empty());

    let stressed = calm.with("stress_level", AnswerValue::Scale(5));
    assert_eq!(
        insight_keys(&stressed),
        vec!["high_stress", "no_relaxation_under_stress"]
    );
}

#[test]
fn custom_weights_keep_the_bounds() {
    let config = ScoringConfig {
        weights: PillarWeights {
            diet: 15,
            activity: 15,
            sleep: 40,
            stress: 30,
        },
        ..ScoringConfig::default()
    };
    let scorer = LifestyleScorer::new(catalog(), config).expect("valid weights");

    assert_eq!(scorer.score(&best_answers()).score, 100);
    assert_eq!(scorer.score(&worst_answers()).score, 0);

    let sleep_only = AnswerSet::new()
        .with("sleep_hours", AnswerValue::choice("7_to_9"))
        .with("sleep_quality", AnswerValue::Scale(5));
    assert_eq!(scorer.score(&sleep_only).score, 40);
}

#[test]
fn rejects_weights_that_do_not_total_one_hundred() {
    let config = ScoringConfig {
        weights: PillarWeights {
            diet: 30,
            activity: 30,
            sleep: 30,
            stress: 30,
        },
        ..ScoringConfig::default()
    };

    assert_eq!(
        LifestyleScorer::new(catalog(), config).unwrap_err(),
        ScoringConfigError::WeightsMustTotal100(120)
    );
}

#[test]
fn oversized_weights_are_rejected_instead_of_overflowing() {
    let config: ScoringConfig = serde_json::from_value(serde_json::json!({
        "weights": { "diet": u32::MAX, "activity": u32::MAX, "sleep": 2, "stress": 0 },
        "min_vegetable_servings": 3,
        "low_sleep_quality_threshold": 2,
        "high_stress_threshold": 4,
        "low_energy_threshold": 2,
        "preview_min_answers": 3
    }))
    .expect("config parses");

    assert_eq!(
        LifestyleScorer::new(catalog(), config).unwrap_err(),
        ScoringConfigError::WeightsMustTotal100(2 * u64::from(u32::MAX) + 2)
    );
}

#[test]
fn summary_never_contradicts_insights() {
    let catalog = catalog();
    let mut samples = vec![
        AnswerSet::new(),
        best_answers(),
        worst_answers(),
        typical_answers(),
    ];
    for question in catalog.questions() {
        let mut answers = best_answers();
        answers.insert(question.id, question.worst_value().expect("worst value"));
        samples.push(answers);
    }

    for answers in samples {
        let assessment = score(&answers);
        let message = summarize(&answers);
        let praised = message
            .split("You did well with ")
            .nth(1)
            .and_then(|rest| rest.split('.').next())
            .unwrap_or("");
        let watched = message
            .split("Worth watching: ")
            .nth(1)
            .and_then(|rest| rest.split('.').next())
            .unwrap_or("");

        for pillar in Pillar::ordered() {
            let flagged = assessment.has_insight_for(pillar);
            if flagged {
                assert!(
                    watched.contains(pillar.topic()),
                    "{pillar:?} has an insight but is missing from `{message}`"
                );
                assert!(
                    !praised.contains(pillar.topic()),
                    "{pillar:?} praised despite an insight in `{message}`"
                );
            } else {
                assert!(
                    !watched.contains(pillar.topic()),
                    "{pillar:?} flagged without an insight in `{message}`"
                );
            }
        }
    }
}

#[test]
fn summary_wording_for_reference_days() {
    assert_eq!(
        summarize(&AnswerSet::new()),
        "No check-in answers recorded yet. Complete today's check-in to see your lifestyle summary."
    );
    assert_eq!(
        summarize(&best_answers()),
        "Excellent day! Your lifestyle score is 100. You did well with diet, activity, sleep, stress and overall wellbeing."
    );
    assert_eq!(
        summarize(&typical_answers()),
        "A mixed day. Your lifestyle score is 41. Worth watching: diet, sleep, stress and overall wellbeing."
    );
}

#[test]
fn preview_waits_for_enough_answers() {
    let scorer = scorer();
    let three = AnswerSet::new()
        .with("meal_quality", AnswerValue::choice("whole_foods"))
        .with("vegetable_servings", AnswerValue::Scale(5))
        .with("sugary_drinks", AnswerValue::Flag(false));
    assert_eq!(scorer.preview(&three), None);

    let four = three.with("exercise_minutes", AnswerValue::choice("over_60"));
    assert_eq!(scorer.preview(&four), Some(scorer.score(&four).score));
}

#[test]
fn preview_ignores_answers_the_catalog_does_not_accept() {
    let scorer = scorer();
    let noise = AnswerSet::new()
        .with("a", AnswerValue::Scale(1))
        .with("b", AnswerValue::choice("x"))
        .with("c", AnswerValue::Flag(true))
        .with("d", AnswerValue::Scale(4));
    assert_eq!(scorer.preview(&noise), None);

    let mostly_noise = noise
        .with("sleep_quality", AnswerValue::Scale(5))
        .with("stress_level", AnswerValue::Scale(9))
        .with("vegetable_servings", AnswerValue::choice("lots"));
    assert_eq!(scorer.preview(&mostly_noise), None, "one accepted answer");
}
