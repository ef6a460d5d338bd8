use scorm_application::SyncEngine;
use scorm_core::codec::{
    AudioCaptioning, CompletionStatus, Credit, Entry, InteractionResult, InteractionType, Mode,
    SuccessStatus, TimeLimitAction,
};
use scorm_core::{BridgeCall, EngineState, ScormError};
use scorm_interaction::RecordingBridge;
use std::sync::Arc;

fn resumed_lms() -> RecordingBridge {
    RecordingBridge::new().with_values([
        ("cmi._version", "1.0"),
        ("cmi.learner_id", "learner-42"),
        ("cmi.learner_name", "Lovelace, Ada"),
        ("cmi.launch_data", "chapter=2"),
        ("cmi.completion_status", "incomplete"),
        ("cmi.completion_threshold", "0.8"),
        ("cmi.credit", "credit"),
        ("cmi.entry", "resume"),
        ("cmi.mode", "normal"),
        ("cmi.location", "page-7"),
        ("cmi.suspend_data", "{\"p\":7}"),
        ("cmi.max_time_allowed", "PT1H"),
        ("cmi.total_time", "PT1H30M5.5S"),
        ("cmi.time_limit_action", "continue,no message"),
        ("cmi.scaled_passing_score", "0.7"),
        ("cmi.progress_measure", " 0.45 "),
        ("cmi.score.scaled", "0.5"),
        ("cmi.score.raw", "50"),
        ("cmi.score.max", "100"),
        ("cmi.score.min", "not a number"),
        ("cmi.success_status", "unknown"),
        ("cmi.learner_preference.audio_level", "1.5"),
        ("cmi.learner_preference.language", "en-GB"),
        ("cmi.learner_preference.delivery_speed", "0.75"),
        ("cmi.learner_preference.audio_captioning", "-1"),
        // interactions
        ("cmi.interactions._count", "2"),
        ("cmi.interactions.0.id", "q-first"),
        ("cmi.interactions.0.type", "choice"),
        ("cmi.interactions.0.timestamp", "2024-02-01T10:00:00"),
        ("cmi.interactions.0.weighting", "2"),
        ("cmi.interactions.0.learner_response", "b"),
        ("cmi.interactions.0.result", "correct"),
        ("cmi.interactions.0.latency", "PT12S"),
        ("cmi.interactions.0.description", "First question"),
        ("cmi.interactions.0.objectives._count", "2"),
        ("cmi.interactions.0.objectives.0.id", "obj-a"),
        ("cmi.interactions.0.objectives.1.id", "obj-b"),
        ("cmi.interactions.0.correct_responses._count", "1"),
        ("cmi.interactions.0.correct_responses.0.pattern", "b"),
        ("cmi.interactions.1.id", "q-second"),
        ("cmi.interactions.1.type", "numeric"),
        ("cmi.interactions.1.result", "0.25"),
        ("cmi.interactions.1.timestamp", "garbage"),
        // objectives
        ("cmi.objectives._count", "1"),
        ("cmi.objectives.0.id", "obj-a"),
        ("cmi.objectives.0.score.scaled", "0.9"),
        ("cmi.objectives.0.success_status", "passed"),
        ("cmi.objectives.0.completion_status", "completed"),
        ("cmi.objectives.0.progress_measure", "1"),
        ("cmi.objectives.0.description", "Know the basics"),
        // comments
        ("cmi.comments_from_learner._count", "1"),
        ("cmi.comments_from_learner.0.comment", "Too long"),
        ("cmi.comments_from_learner.0.location", "page-3"),
        ("cmi.comments_from_learner.0.timestamp", "2024-01-31T09:15:00"),
        ("cmi.comments_from_lms._count", "1"),
        ("cmi.comments_from_lms.0.comment", "Welcome back"),
    ])
}

#[tokio::test]
async fn reconstructs_the_record() {
    let lms = Arc::new(resumed_lms());
    let mut engine = SyncEngine::new(lms.clone());

    engine.initialize().await.unwrap();

    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(engine.version(), "1.0");
    assert_eq!(engine.learner_id(), "learner-42");
    assert_eq!(engine.learner_name(), "Lovelace, Ada");
    assert_eq!(engine.launch_data(), "chapter=2");
    assert_eq!(engine.completion_status(), CompletionStatus::Incomplete);
    assert_eq!(engine.completion_threshold(), 0.8);
    assert_eq!(engine.credit(), Credit::Credit);
    assert_eq!(engine.entry(), Entry::Resume);
    assert_eq!(engine.mode(), Mode::Normal);
    assert_eq!(engine.location(), "page-7");
    assert_eq!(engine.suspend_data(), "{\"p\":7}");
    assert_eq!(engine.max_time_allowed(), 3600.0);
    assert_eq!(engine.total_time(), 5405.5);
    assert_eq!(engine.time_limit_action(), TimeLimitAction::ContinueNoMessage);
    assert_eq!(engine.scaled_passing_score(), 0.7);
    assert_eq!(engine.progress_measure(), 0.45);
    assert_eq!(engine.success_status(), SuccessStatus::Unknown);

    let score = engine.score();
    assert_eq!((score.scaled, score.raw, score.max, score.min), (0.5, 50.0, 100.0, 0.0));

    let preference = engine.learner_preference();
    assert_eq!(preference.audio_level, 1.5);
    assert_eq!(preference.language, "en-GB");
    assert_eq!(preference.delivery_speed, 0.75);
    assert_eq!(preference.audio_captioning, AudioCaptioning::Off);
}

#[tokio::test]
async fn nested_interaction_lists_follow_their_own_counts() {
    let lms = Arc::new(resumed_lms());
    let mut engine = SyncEngine::new(lms.clone());
    engine.initialize().await.unwrap();

    let interactions = engine.interactions();
    assert_eq!(interactions.len(), 2);

    let first = &interactions[0];
    assert_eq!(first.id, "q-first");
    assert_eq!(first.interaction_type, InteractionType::Choice);
    assert_eq!(first.result, InteractionResult::Correct);
    assert_eq!(first.weighting, 2.0);
    assert_eq!(first.latency, 12.0);
    assert_eq!(first.objective_ids, vec!["obj-a", "obj-b"]);
    assert_eq!(first.correct_response_patterns, vec!["b"]);
    assert!(first.timestamp.is_some());

    let second = &interactions[1];
    assert_eq!(second.id, "q-second");
    assert_eq!(second.interaction_type, InteractionType::Numeric);
    assert_eq!(second.result, InteractionResult::Estimate(0.25));
    assert_eq!(second.timestamp, None);
    assert!(second.objective_ids.is_empty());
    assert!(second.correct_response_patterns.is_empty());

    let calls = lms.calls();
    assert!(calls.contains(&BridgeCall::get("cmi.interactions.0.objectives.1.id")));
    assert!(!calls.contains(&BridgeCall::get("cmi.interactions.0.objectives.2.id")));
    assert!(!calls.contains(&BridgeCall::get("cmi.interactions.2.id")));
}

#[tokio::test]
async fn objectives_and_comments_are_loaded() {
    let lms = Arc::new(resumed_lms());
    let mut engine = SyncEngine::new(lms);
    engine.initialize().await.unwrap();

    let objective = &engine.objectives()[0];
    assert_eq!(objective.id, "obj-a");
    assert_eq!(objective.score.scaled, 0.9);
    assert_eq!(objective.success_status, SuccessStatus::Passed);
    assert_eq!(objective.completion_status, CompletionStatus::Completed);
    assert_eq!(objective.progress_measure, 1.0);
    assert_eq!(objective.description, "Know the basics");
    assert_eq!(engine.record().objective("obj-a"), Some(objective));

    let comment = &engine.comments_from_learner()[0];
    assert_eq!(comment.comment, "Too long");
    assert_eq!(comment.location, "page-3");
    assert!(comment.timestamp.is_some());
    assert_eq!(comment.id, "urn:scorm:comment-id-0");

    let lms_comment = &engine.comments_from_lms()[0];
    assert_eq!(lms_comment.comment, "Welcome back");
    assert_eq!(lms_comment.timestamp, None);
}

#[tokio::test]
async fn interaction_fields_are_read_in_protocol_order() {
    let lms = Arc::new(resumed_lms());
    let mut engine = SyncEngine::new(lms.clone());
    engine.initialize().await.unwrap();

    let reads: Vec<String> = lms
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            BridgeCall::GetValue { key } if key.starts_with("cmi.interactions.0.") => Some(key),
            _ => None,
        })
        .collect();

    assert_eq!(
        reads,
        vec![
            "cmi.interactions.0.id",
            "cmi.interactions.0.type",
            "cmi.interactions.0.timestamp",
            "cmi.interactions.0.weighting",
            "cmi.interactions.0.learner_response",
            "cmi.interactions.0.latency",
            "cmi.interactions.0.description",
            "cmi.interactions.0.result",
            "cmi.interactions.0.objectives._count",
            "cmi.interactions.0.objectives.0.id",
            "cmi.interactions.0.objectives.1.id",
            "cmi.interactions.0.correct_responses._count",
            "cmi.interactions.0.correct_responses.0.pattern",
        ]
    );
}

#[tokio::test]
async fn read_failure_aborts_initialize() {
    let lms = Arc::new(resumed_lms().fail_on("cmi.location"));
    let mut engine = SyncEngine::new(lms.clone());

    let err = engine.initialize().await.unwrap_err();

    assert!(err.is_bridge());
    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert_eq!(engine.learner_id(), "");
    assert!(engine.interactions().is_empty());
    assert_eq!(
        lms.calls().last(),
        Some(&BridgeCall::get("cmi.location"))
    );
    assert!(matches!(
        engine.set_location("x").await,
        Err(ScormError::NotReady { .. })
    ));
}
