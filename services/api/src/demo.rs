use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

use helm_ai::advisor::{
    InterviewConclusion, InterviewConfig, InterviewEngine, InterviewService, QuestionView,
    Recommendation, TurnStep,
};
use helm_ai::analytics::NullSink;
use helm_ai::catalog::{
    Catalog, CatalogSettings, ClassGuide, ClassId, ClassProfile, Effect, GuideLink, OptionSpec,
    Question, QuestionId,
};
use helm_ai::commentary::NoCommentary;
use helm_ai::error::AppError;

use crate::infra::InMemorySessionStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Semicolon-separated answers to play; unanswered turns take the first option
    #[arg(long)]
    pub(crate) answers: Option<String>,
    /// Language tag recorded on the session
    #[arg(long)]
    pub(crate) language: Option<String>,
    /// Print the running scores after every answer
    #[arg(long)]
    pub(crate) show_scores: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        answers,
        language,
        show_scores,
    } = args;

    let scripted: Vec<String> = answers
        .as_deref()
        .map(|raw| {
            raw.split(';')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let catalog = Arc::new(sample_catalog());
    let engine = Arc::new(InterviewEngine::new(catalog, InterviewConfig::default()));
    let service = InterviewService::new(
        engine,
        Arc::new(InMemorySessionStore::default()),
        Arc::new(NullSink),
        Arc::new(NoCommentary),
    );

    println!("Interview demo (sample catalog)");

    let start = service.start(language)?;
    let session_id = start.session.session_id.clone();
    let mut current = start.question;
    let mut turn = 0usize;

    while let Some(question) = current.take() {
        let answer = choose_answer(&question, scripted.get(turn).map(String::as_str));
        turn += 1;

        println!("\nQ{turn}: {}", question.text);
        for option in &question.options {
            println!("  [{}] {}", option.id, option.label);
        }
        println!("> {answer}");

        let outcome = service.answer(&session_id, &question.id, &answer).await;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("turn failed: {err}");
                break;
            }
        };

        if show_scores {
            let record = service.get(&session_id)?;
            let scores: Vec<String> = record
                .session
                .scores
                .iter()
                .map(|(class_id, score)| format!("{}={}", class_id.0, score))
                .collect();
            println!("scores: {}", scores.join(" "));
        }

        match outcome.step {
            TurnStep::NextQuestion { question } => current = Some(question),
            TurnStep::Concluded { conclusion } => {
                render_conclusion(&conclusion);
                break;
            }
        }
    }

    Ok(())
}

fn choose_answer(question: &QuestionView, scripted: Option<&str>) -> String {
    if let Some(answer) = scripted {
        return answer.to_string();
    }
    question
        .options
        .first()
        .map(|option| option.label.clone())
        .unwrap_or_default()
}

fn render_conclusion(conclusion: &InterviewConclusion) {
    match conclusion {
        InterviewConclusion::Recommended(recommendation) => render_result(recommendation),
        InterviewConclusion::Undetermined => {
            println!("\nNo class remained in contention; nothing to recommend.");
        }
    }
}

fn render_result(result: &Recommendation) {
    println!("\nYour recommended class: {}", result.name);
    if !result.summary.is_empty() {
        println!("{}", result.summary);
    }
    for line in &result.why {
        println!("- {line}");
    }
    if !result.tips.is_empty() {
        println!("\nTop tips:");
        for tip in result.tips.iter().take(5) {
            println!("- {tip}");
        }
    }
    if !result.links.is_empty() {
        println!("\nLinks:");
        for link in result.links.iter().take(5) {
            println!("- {}: {}", link.label, link.href);
        }
    }
}

fn class(id: &str, name: &str, summary: &str) -> ClassProfile {
    ClassProfile {
        class_id: ClassId(id.to_string()),
        name: name.to_string(),
        summary: summary.to_string(),
    }
}

fn question(id: &str, text: &str, phase: i32, priority: i32, options: &str) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        text: text.to_string(),
        phase,
        priority,
        options: OptionSpec::Inline(options.to_string()),
    }
}

fn effect(question: &str, option: &str, exclude: &[&str], up: &[&str], down: &[&str]) -> Effect {
    let ids = |names: &[&str]| names.iter().map(|n| ClassId(n.to_string())).collect();
    Effect {
        question_id: QuestionId(question.to_string()),
        option: option.to_string(),
        exclude: ids(exclude),
        up: ids(up),
        down: ids(down),
    }
}

fn sample_catalog() -> Catalog {
    let questions = vec![
        question(
            "q_guests",
            "How many guests do you usually host aboard?",
            1,
            3,
            "Up to 4, Five to twelve, More than 12",
        ),
        question(
            "q_trip",
            "What kind of trips do you have in mind?",
            1,
            2,
            "Day trips, Weekends, Extended cruising",
        ),
        question(
            "q_propulsion",
            "Do you lean toward sail or motor?",
            2,
            0,
            "Sail, Motor, Either",
        ),
        question(
            "q_stability",
            "How much does stability at anchor matter?",
            2,
            0,
            "Very important, Somewhat, Not a concern",
        ),
        question(
            "q_crew",
            "Who will run the boat?",
            2,
            0,
            "Myself, Professional crew",
        ),
        question(
            "q_budget",
            "How do you see the running costs?",
            2,
            0,
            "Modest, Flexible",
        ),
    ];

    let effects = vec![
        effect("q_guests", "Up to 4", &[], &["day_cruiser", "weekender"], &[]),
        effect("q_guests", "Five to twelve", &[], &["motor_yacht", "catamaran"], &[]),
        effect(
            "q_guests",
            "More than 12",
            &["day_cruiser", "weekender"],
            &["motor_yacht"],
            &[],
        ),
        effect("q_trip", "Day trips", &["explorer"], &["day_cruiser"], &[]),
        effect("q_trip", "Weekends", &[], &["weekender"], &[]),
        effect("q_trip", "Extended cruising", &[], &["explorer"], &["day_cruiser"]),
        effect(
            "q_propulsion",
            "Sail",
            &[],
            &["sailing_yacht", "catamaran"],
            &["motor_yacht"],
        ),
        effect("q_propulsion", "Motor", &[], &["motor_yacht"], &["sailing_yacht"]),
        effect("q_stability", "Very important", &[], &["catamaran", "explorer"], &[]),
        effect("q_crew", "Myself", &[], &["day_cruiser", "sailing_yacht"], &["explorer"]),
        effect("q_crew", "Professional crew", &[], &["motor_yacht", "explorer"], &[]),
        effect("q_budget", "Modest", &[], &[], &["motor_yacht", "explorer"]),
        effect("q_budget", "Flexible", &[], &["explorer"], &[]),
    ];

    let classes = vec![
        class(
            "day_cruiser",
            "Day Cruiser",
            "Compact, easy to handle, made for short hops in sheltered water.",
        ),
        class(
            "weekender",
            "Weekender",
            "A small cabin and simple systems for overnight escapes.",
        ),
        class(
            "sailing_yacht",
            "Sailing Yacht",
            "Wind-driven cruising with ocean-capable hulls.",
        ),
        class(
            "motor_yacht",
            "Motor Yacht",
            "Spacious, fast, and comfortable for larger parties.",
        ),
        class(
            "catamaran",
            "Catamaran",
            "Twin hulls for stability, shallow draft, and deck space.",
        ),
        class(
            "explorer",
            "Explorer Yacht",
            "Long-range displacement cruiser built for remote itineraries.",
        ),
    ];

    let mut guides = BTreeMap::new();
    guides.insert(
        ClassId("day_cruiser".to_string()),
        ClassGuide {
            tips: vec![
                "Favor outboard power for easy maintenance".to_string(),
                "A walk-around deck makes single-handed docking simpler".to_string(),
                "Trailer compatibility widens your cruising grounds".to_string(),
            ],
            links: vec![GuideLink {
                label: "Day boat builders".to_string(),
                href: "https://example.com/day-boats".to_string(),
            }],
        },
    );
    guides.insert(
        ClassId("motor_yacht".to_string()),
        ClassGuide {
            tips: vec![
                "Budget fuel at cruise speed, not top speed".to_string(),
                "Stabilizers pay for themselves on longer passages".to_string(),
            ],
            links: vec![GuideLink {
                label: "Motor yacht shipyards".to_string(),
                href: "https://example.com/motor-yachts".to_string(),
            }],
        },
    );
    guides.insert(
        ClassId("explorer".to_string()),
        ClassGuide {
            tips: vec![
                "Range and redundancy matter more than speed".to_string(),
                "Plan refit windows around your cruising seasons".to_string(),
            ],
            links: vec![GuideLink {
                label: "Explorer yacht yards".to_string(),
                href: "https://example.com/explorers".to_string(),
            }],
        },
    );

    Catalog::new(questions, effects, classes, guides, CatalogSettings::default())
}
