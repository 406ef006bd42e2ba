use super::domain::Pillar;
use super::scoring::LifestyleAssessment;

const NO_ANSWERS: &str =
    "No check-in answers recorded yet. Complete today's check-in to see your lifestyle summary.";

/// Builds the completion-screen message from an assessment.
///
/// Pillars are only praised when every answer in them is at its best option and no insight
/// fired for them; every pillar with an insight is named as worth watching.
pub(crate) fn compose(assessment: &LifestyleAssessment) -> String {
    let answered_any = assessment.pillars.iter().any(|pillar| pillar.answered > 0);
    if !answered_any {
        return NO_ANSWERS.to_string();
    }

    let strong: Vec<&'static str> = Pillar::ordered()
        .into_iter()
        .filter(|pillar| {
            !assessment.has_insight_for(*pillar)
                && assessment
                    .pillar(*pillar)
                    .map(|entry| entry.at_best)
                    .unwrap_or(false)
        })
        .map(Pillar::topic)
        .collect();

    let concerns: Vec<&'static str> = Pillar::ordered()
        .into_iter()
        .filter(|pillar| assessment.has_insight_for(*pillar))
        .map(Pillar::topic)
        .collect();

    let mut sentences = Vec::new();

    let scored_any = assessment
        .pillars
        .iter()
        .any(|pillar| pillar.weight > 0 && pillar.answered > 0);
    if scored_any {
        sentences.push(opener(assessment.score).to_string());
        sentences.push(format!("Your lifestyle score is {}.", assessment.score));
    }

    if !strong.is_empty() {
        sentences.push(format!("You did well with {}.", join_topics(&strong)));
    }

    if !concerns.is_empty() {
        sentences.push(format!("Worth watching: {}.", join_topics(&concerns)));
    }

    if strong.is_empty() && concerns.is_empty() {
        sentences.push("A steady day. Small, consistent habits add up.".to_string());
    }

    sentences.join(" ")
}

fn opener(score: u8) -> &'static str {
    match score {
        80..=100 => "Excellent day!",
        60..=79 => "Good day overall.",
        40..=59 => "A mixed day.",
        _ => "A tough day, and tomorrow is a fresh start.",
    }
}

fn join_topics(topics: &[&str]) -> String {
    match topics {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_topics_naturally() {
        assert_eq!(join_topics(&["sleep"]), "sleep");
        assert_eq!(join_topics(&["diet", "sleep"]), "diet and sleep");
        assert_eq!(
            join_topics(&["diet", "activity", "stress"]),
            "diet, activity and stress"
        );
    }

    #[test]
    fn opener_tracks_score_band() {
        assert_eq!(opener(100), "Excellent day!");
        assert_eq!(opener(65), "Good day overall.");
        assert_eq!(opener(40), "A mixed day.");
        assert!(opener(0).starts_with("A tough day"));
    }
}
