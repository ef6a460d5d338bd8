use scorm_application::{LogAndContinue, SyncEngine};
use scorm_core::codec::CompletionStatus;
use scorm_core::{BridgeCall, Objective};
use scorm_interaction::{CallbackBridge, RecordingBridge};
use std::sync::Arc;
use std::time::Duration;

/// Reads issued by the bulk load against an LMS with empty collections.
fn empty_bulk_load() -> Vec<BridgeCall> {
    [
        "cmi._version",
        "cmi.comments_from_learner._count",
        "cmi.comments_from_lms._count",
        "cmi.completion_status",
        "cmi.completion_threshold",
        "cmi.credit",
        "cmi.entry",
        "cmi.interactions._count",
        "cmi.launch_data",
        "cmi.learner_id",
        "cmi.learner_name",
        "cmi.learner_preference.audio_level",
        "cmi.learner_preference.language",
        "cmi.learner_preference.delivery_speed",
        "cmi.learner_preference.audio_captioning",
        "cmi.location",
        "cmi.objectives._count",
        "cmi.max_time_allowed",
        "cmi.mode",
        "cmi.progress_measure",
        "cmi.scaled_passing_score",
        "cmi.score.scaled",
        "cmi.score.raw",
        "cmi.score.max",
        "cmi.score.min",
        "cmi.success_status",
        "cmi.suspend_data",
        "cmi.time_limit_action",
        "cmi.total_time",
    ]
    .into_iter()
    .map(|key| BridgeCall::get(key))
    .collect()
}

#[tokio::test]
async fn complete_session_call_log() {
    let lms = Arc::new(RecordingBridge::new().with_value("cmi._version", "1.0"));
    let mut engine = SyncEngine::new(lms.clone());

    engine.initialize().await.unwrap();
    engine
        .set_completion_status(CompletionStatus::Completed)
        .await
        .unwrap();
    engine
        .append_objective(Objective {
            progress_measure: 1.0,
            ..Objective::new("Finish the course")
        })
        .await
        .unwrap();
    engine.commit().await.unwrap();

    let mut expected = vec![BridgeCall::Initialize, BridgeCall::IsV2004];
    expected.extend(empty_bulk_load());
    expected.push(BridgeCall::set("cmi.completion_status", "completed"));
    expected.extend([
        BridgeCall::set("cmi.objectives.0.id", "urn:scorm:objective-id-0"),
        BridgeCall::set("cmi.objectives.0.score.scaled", "0"),
        BridgeCall::set("cmi.objectives.0.score.raw", "0"),
        BridgeCall::set("cmi.objectives.0.score.max", "0"),
        BridgeCall::set("cmi.objectives.0.score.min", "0"),
        BridgeCall::set("cmi.objectives.0.success_status", ""),
        BridgeCall::set("cmi.objectives.0.completion_status", ""),
        BridgeCall::set("cmi.objectives.0.progress_measure", "1"),
        BridgeCall::set("cmi.objectives.0.description", "Finish the course"),
    ]);
    expected.push(BridgeCall::Commit);

    assert_eq!(lms.calls(), expected);
    assert_eq!(lms.value("cmi.completion_status").as_deref(), Some("completed"));
}

#[tokio::test]
async fn log_and_continue_swallows_write_failures() {
    let lms = Arc::new(RecordingBridge::new().fail_on("cmi.session_time"));
    let mut engine = SyncEngine::new(lms.clone());

    assert_eq!(
        engine.set_location("early").await.log_and_continue("set_location"),
        None
    );

    engine.initialize().await.unwrap();
    assert_eq!(
        engine
            .set_session_time(12.0)
            .await
            .log_and_continue("set_session_time"),
        None
    );
    assert_eq!(
        engine
            .set_progress_measure(0.3)
            .await
            .log_and_continue("set_progress_measure"),
        Some(())
    );
    assert_eq!(engine.session_time(), 12.0);
    assert_eq!(engine.location(), "");
}

#[tokio::test]
async fn session_over_callback_bridge() {
    let (bridge, mut host) = CallbackBridge::channel(Some(Duration::from_secs(5)));

    let lms = tokio::spawn({
        let bridge = bridge.clone();
        async move {
            let mut served = Vec::new();
            while let Some(request) = host.recv().await {
                let done = request.call == BridgeCall::Terminate;
                let reply = match &request.call {
                    BridgeCall::GetValue { key } if key == "cmi.learner_name" => "Hopper|Grace",
                    BridgeCall::GetValue { .. } => "",
                    _ => "true",
                };
                bridge.deliver(&format!("{reply}|{}", request.id)).unwrap();
                served.push(request.call);
                if done {
                    break;
                }
            }
            served
        }
    });

    let mut engine = SyncEngine::new(bridge.clone());
    engine.initialize().await.unwrap();
    assert_eq!(engine.learner_name(), "Hopper|Grace");

    engine.set_location("page-1").await.unwrap();
    engine.commit().await.unwrap();
    engine.terminate().await.unwrap();

    let served = lms.await.unwrap();
    assert_eq!(served.first(), Some(&BridgeCall::Initialize));
    assert_eq!(served.last(), Some(&BridgeCall::Terminate));
    assert!(served.contains(&BridgeCall::set("cmi.location", "page-1")));
    assert_eq!(bridge.pending_request(), None);
}
