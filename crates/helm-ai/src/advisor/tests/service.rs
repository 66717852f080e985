use super::common::*;
use crate::advisor::{InterviewConclusion, InterviewStatus, ServiceError, TurnStep};
use crate::analytics::InterviewEvent;
use crate::catalog::{ClassId, QuestionId};

#[tokio::test]
async fn start_returns_the_highest_priority_opening_question() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");

    let question = start.question.expect("first question present");
    assert_eq!(question.id, QuestionId("q_guests".to_string()));
    assert_eq!(question.options.len(), 3);
    assert_eq!(start.session.status, "in_progress");
    assert_eq!(start.session.classes_in_contention, 4);
}

#[tokio::test]
async fn opening_questions_run_in_priority_order_before_adaptive_ones() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    let outcome = service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Five to twelve")
        .await
        .expect("turn succeeds");

    match outcome.step {
        TurnStep::NextQuestion { question } => {
            assert_eq!(question.id, QuestionId("q_range".to_string()));
        }
        other => panic!("expected next question, got {other:?}"),
    }

    let outcome = service
        .answer(&session_id, &QuestionId("q_range".to_string()), "Marina")
        .await
        .expect("turn succeeds");

    // Both opening questions are spent; the adaptive pick targets the
    // question that can still move the most classes.
    match outcome.step {
        TurnStep::NextQuestion { question } => {
            assert_eq!(question.id, QuestionId("q_propulsion".to_string()));
        }
        other => panic!("expected adaptive question, got {other:?}"),
    }
}

#[tokio::test]
async fn decisive_lead_concludes_with_a_recommendation() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Up to 4")
        .await
        .expect("turn succeeds");
    let outcome = service
        .answer(&session_id, &QuestionId("q_range".to_string()), "Coastal")
        .await
        .expect("turn succeeds");

    // day_cruiser leads 2-0 over a field of three survivors.
    match outcome.step {
        TurnStep::Concluded { conclusion } => match conclusion {
            InterviewConclusion::Recommended(recommendation) => {
                assert_eq!(recommendation.class_id, ClassId("day_cruiser".to_string()));
                assert_eq!(recommendation.name, "Day Cruiser");
                assert_eq!(recommendation.why.len(), 3);
                assert_eq!(recommendation.tips.len(), 1);
            }
            other => panic!("expected recommendation, got {other:?}"),
        },
        other => panic!("expected conclusion, got {other:?}"),
    }

    let record = service.get(&session_id).expect("record present");
    assert_eq!(record.status, InterviewStatus::Concluded);
    assert!(record.pending_question.is_none());
}

#[tokio::test]
async fn commentary_rides_along_without_affecting_the_turn() {
    let (service, _) = build_service_with_commentary(CannedCommentary {
        remark: Some("A fine choice for sheltered waters.".to_string()),
    });
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    let outcome = service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Up to 4")
        .await
        .expect("turn succeeds");

    assert_eq!(
        outcome.commentary.as_deref(),
        Some("A fine choice for sheltered waters.")
    );
    assert!(matches!(outcome.step, TurnStep::NextQuestion { .. }));
}

#[tokio::test]
async fn silent_commentary_leaves_the_outcome_intact() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    let outcome = service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Up to 4")
        .await
        .expect("turn succeeds");

    assert!(outcome.commentary.is_none());
    assert!(matches!(outcome.step, TurnStep::NextQuestion { .. }));
}

#[tokio::test]
async fn out_of_turn_answers_are_rejected() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    let error = service
        .answer(&session_id, &QuestionId("q_propulsion".to_string()), "Sail")
        .await
        .expect_err("expected rejection");

    match error {
        ServiceError::UnexpectedQuestion { pending, received } => {
            assert_eq!(pending, Some(QuestionId("q_guests".to_string())));
            assert_eq!(received, QuestionId("q_propulsion".to_string()));
        }
        other => panic!("expected unexpected-question error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_sessions_are_not_found() {
    let (service, _) = build_service();
    let error = service
        .answer(
            &crate::advisor::SessionId("session-missing".to_string()),
            &QuestionId("q_guests".to_string()),
            "Up to 4",
        )
        .await
        .expect_err("expected not found");
    assert!(matches!(
        error,
        ServiceError::Store(crate::advisor::StoreError::NotFound)
    ));
}

#[tokio::test]
async fn concluded_sessions_reject_further_answers() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Up to 4")
        .await
        .expect("turn succeeds");
    service
        .answer(&session_id, &QuestionId("q_range".to_string()), "Coastal")
        .await
        .expect("turn succeeds");

    let error = service
        .answer(&session_id, &QuestionId("q_propulsion".to_string()), "Sail")
        .await
        .expect_err("expected rejection");
    assert!(matches!(error, ServiceError::SessionConcluded(_)));
}

#[tokio::test]
async fn analytics_receives_each_step_and_one_result() {
    let (service, sink) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "Up to 4")
        .await
        .expect("turn succeeds");
    service
        .answer(&session_id, &QuestionId("q_range".to_string()), "Coastal")
        .await
        .expect("turn succeeds");
    settle().await;

    let events = sink.events();
    let steps = events
        .iter()
        .filter(|event| matches!(event, InterviewEvent::Step { .. }))
        .count();
    let results: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            InterviewEvent::Result { conclusion, asked, .. } => Some((conclusion, asked)),
            _ => None,
        })
        .collect();

    assert_eq!(steps, 2);
    assert_eq!(results.len(), 1);
    let (conclusion, asked) = &results[0];
    assert!(matches!(conclusion, InterviewConclusion::Recommended(_)));
    assert_eq!(asked.len(), 2);
}

#[tokio::test]
async fn excluded_classes_never_return_to_contention() {
    let (service, _) = build_service();
    let start = service.start(None).expect("session starts");
    let session_id = start.session.session_id.clone();

    service
        .answer(&session_id, &QuestionId("q_guests".to_string()), "More than 12")
        .await
        .expect("turn succeeds");

    let record = service.get(&session_id).expect("record present");
    assert!(record
        .session
        .is_excluded(&ClassId("day_cruiser".to_string())));
    // The score survives exclusion for inspection.
    assert!(record
        .session
        .scores
        .contains_key(&ClassId("day_cruiser".to_string())));
}
