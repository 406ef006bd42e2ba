use crate::infra::{parse_datetime, InMemoryCheckinRepository, InMemoryReminderScheduler};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use clap::Args;
use lifestyle_checkin::checkin::{
    AnswerSet, AnswerValue, CheckinAvailability, CheckinRecord, CheckinRepository,
    CheckinSchedule, CheckinService, CheckinServiceError, CheckinSession, LifestyleScorer, Pillar,
    QuestionCatalog, QuestionKind, SessionStep, UserId,
};
use lifestyle_checkin::error::AppError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Print the catalog as JSON instead of a readable listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answers as a JSON object, or @path to read them from a file
    #[arg(long)]
    pub(crate) answers: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Local check-in time (YYYY-MM-DDTHH:MM). Defaults to today at 19:30.
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) at: Option<NaiveDateTime>,
    /// User identifier used for the stored record
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Skip seeding earlier check-ins for the proactive prompts
    #[arg(long)]
    pub(crate) skip_history: bool,
}

#[derive(Debug, Serialize)]
struct ScoreOutput<'a> {
    score: u8,
    insights: Vec<&'a str>,
    message: String,
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let catalog = QuestionCatalog::standard();

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.questions())?);
        return Ok(());
    }

    for pillar in Pillar::ordered() {
        println!("{}", pillar.label());
        for question in catalog.questions_for_pillar(pillar) {
            println!("  [{}] {}", question.id, question.question);
            if question.is_multiple_choice() {
                let labels: Vec<&str> = question.options.iter().map(|option| option.label).collect();
                println!("      options: {}", labels.join(" | "));
            } else if let QuestionKind::Scale { min, max } = question.kind {
                println!("      range: {min}..={max}");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = match args.answers.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => args.answers,
    };
    let answers: AnswerSet = serde_json::from_str(&raw)?;

    let scorer = LifestyleScorer::standard();
    let assessment = scorer.score(&answers);
    let output = ScoreOutput {
        score: assessment.score,
        insights: assessment
            .insights
            .iter()
            .map(|insight| insight.message.as_str())
            .collect(),
        message: assessment.summary(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Answers given at each step of the scripted evening, in catalog order.
const SCRIPTED_EVENING: [(&str, DemoAnswer); 11] = [
    ("meal_quality", DemoAnswer::Label("A mix of both")),
    ("vegetable_servings", DemoAnswer::Scale(2)),
    ("sugary_drinks", DemoAnswer::Label("No")),
    ("exercise_minutes", DemoAnswer::Label("Under 30 minutes")),
    ("steps_goal_met", DemoAnswer::Label("Yes")),
    ("sleep_hours", DemoAnswer::Label("5-6 hours")),
    ("sleep_quality", DemoAnswer::Scale(3)),
    ("stress_level", DemoAnswer::Scale(4)),
    ("relaxation_practice", DemoAnswer::Label("No")),
    ("energy_level", DemoAnswer::Scale(2)),
    ("general_wellbeing", DemoAnswer::Label("Okay")),
];

#[derive(Debug, Clone, Copy)]
enum DemoAnswer {
    Label(&'static str),
    Scale(i64),
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        at,
        user,
        skip_history,
    } = args;

    let schedule = CheckinSchedule::default();
    let now = at.unwrap_or_else(|| {
        let evening = NaiveTime::from_hms_opt(19, 30, 0).unwrap_or(NaiveTime::MIN);
        Local::now().date_naive().and_time(evening)
    });
    let user_id = UserId(user);

    let repository = Arc::new(InMemoryCheckinRepository::default());
    let reminders = Arc::new(InMemoryReminderScheduler::default());
    let service = CheckinService::new(
        repository.clone(),
        reminders.clone(),
        LifestyleScorer::standard(),
        schedule,
    );

    if !skip_history {
        seed_history(repository.as_ref(), &user_id, now)?;
    }

    println!("Daily lifestyle check-in demo for {user_id} at {now}");
    let availability = service.availability(&user_id, now)?;
    if let Some(reminder) = reminders.pending() {
        println!(
            "Reminder scheduled daily at {:02}:{:02}: {}",
            reminder.hour, reminder.minute, reminder.title
        );
    }
    match availability {
        CheckinAvailability::Locked { unlocks_at } => {
            println!("Check-in is locked until {unlocks_at}. Try --at with an evening time.");
            return Ok(());
        }
        CheckinAvailability::Completed => {
            println!("Today's check-in is already complete.");
            return Ok(());
        }
        CheckinAvailability::Available => println!("Check-in is open.\n"),
    }

    let scorer = service.scorer();
    let mut session = CheckinSession::new(scorer.catalog());
    let mut finalized = None;
    for (id, answer) in SCRIPTED_EVENING {
        let Some(question) = session.current_question() else {
            break;
        };
        debug_assert_eq!(question.id, id);
        let step = match answer {
            DemoAnswer::Label(label) => {
                println!("{}% {} -> {label}", session.progress_percent(), question.question);
                session.answer_label(label)
            }
            DemoAnswer::Scale(value) => {
                println!("{}% {} -> {value}", session.progress_percent(), question.question);
                session.answer(AnswerValue::Scale(value))
            }
        }
        .map_err(CheckinServiceError::from)?;
        if let Some(preview) = session.preview_score(scorer) {
            println!("     live score: {preview}");
        }
        if let SessionStep::Finished(answers) = step {
            finalized = Some(answers);
        }
    }

    let Some(answers) = finalized else {
        println!("Check-in was not finished.");
        return Ok(());
    };

    let completion = service.complete(&user_id, answers, now)?;
    println!(
        "\nLifestyle score: {} (filed under {})",
        completion.record.lifestyle_score, completion.record.checkin_date
    );
    println!("{}", completion.message);
    if !completion.record.insights.is_empty() {
        println!("Insights:");
        for insight in &completion.record.insights {
            println!("  - {insight}");
        }
    }

    let prompts = service.prompts(&user_id, completion.record.checkin_date)?;
    if prompts.is_empty() {
        println!("\nAssistant openers: none today");
    } else {
        println!("\nAssistant openers");
        for prompt in prompts {
            println!("- [{:?}] {}: {}", prompt.priority, prompt.title, prompt.opener);
        }
    }

    Ok(())
}

/// Stores a few earlier evenings with rising stress so the prompt rules have data.
fn seed_history(
    repository: &InMemoryCheckinRepository,
    user_id: &UserId,
    now: NaiveDateTime,
) -> Result<(), AppError> {
    let today = now.date();
    let history = [(1, 74, 4, 3, 3), (2, 78, 5, 2, 2), (3, 81, 3, 4, 4)];
    for (days_back, score, stress, sleep, energy) in history {
        repository
            .upsert(CheckinRecord {
                user_id: user_id.clone(),
                checkin_date: today - Duration::days(days_back),
                lifestyle_score: score,
                mood: Some(AnswerValue::choice("okay")),
                stress_level: Some(AnswerValue::Scale(stress)),
                sleep_quality: Some(AnswerValue::Scale(sleep)),
                energy_level: Some(AnswerValue::Scale(energy)),
                answers: AnswerSet::new(),
                insights: Vec::new(),
            })
            .map_err(CheckinServiceError::from)?;
    }
    Ok(())
}
