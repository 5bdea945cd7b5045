use std::sync::Arc;

use chunkflow::chance::{FixedChance, Outcome, ScriptedChance, ThreadRngChance};
use chunkflow::config::ReporterConfig;
use chunkflow::error::HandlerError;
use chunkflow::handlers::ChunkReporter;
use chunkflow::invoke::{HandlerKind, invoke};
use chunkflow::orchestrator::mock::{Callback, RecordingOrchestrator};
use serde_json::{Value, json};

/// Helper: a reporter over a recording orchestrator with a fixed draw.
fn build_reporter(chance: f64) -> (ChunkReporter, Arc<RecordingOrchestrator>) {
    let orchestrator = Arc::new(RecordingOrchestrator::new());
    let reporter = ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(FixedChance(chance)),
        ReporterConfig::default(),
    );
    (reporter, orchestrator)
}

// ── Success / failure branches ───────────────────────────────────

#[tokio::test]
async fn low_draw_reports_success_with_fixed_output() {
    let (reporter, orchestrator) = build_reporter(0.1);

    let outcome = reporter
        .report(json!({"taskToken": "abc123"}))
        .await
        .unwrap();
    assert!(outcome.is_success());

    let calls = orchestrator.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Callback::Success { task_token, output } => {
            assert_eq!(task_token, "abc123");
            let output: Value = serde_json::from_str(output).unwrap();
            assert_eq!(
                output,
                json!({"msg": "this goes to the next state", "status": "looking good"})
            );
        }
        other => panic!("expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn high_draw_reports_failure_with_chance_in_cause() {
    let (reporter, orchestrator) = build_reporter(0.95);

    let outcome = reporter
        .report(json!({"taskToken": "abc123"}))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Failed { chance: 0.95 });

    let calls = orchestrator.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Callback::Failure {
            task_token,
            error,
            cause,
        } => {
            assert_eq!(task_token, "abc123");
            assert_eq!(error, "ProcessingFailed");
            assert!(cause.contains("0.95"));
            assert_eq!(cause, "Something broke in our chunk processing chance=0.95");
        }
        other => panic!("expected Failure, got {other:?}"),
    }
}

#[tokio::test]
async fn draw_at_threshold_reports_failure() {
    let (reporter, orchestrator) = build_reporter(0.7);
    reporter.report(json!({"taskToken": "t"})).await.unwrap();
    assert!(matches!(orchestrator.calls()[0], Callback::Failure { .. }));
}

#[tokio::test]
async fn draw_just_below_threshold_reports_success() {
    let (reporter, orchestrator) = build_reporter(0.699_999);
    reporter.report(json!({"taskToken": "t"})).await.unwrap();
    assert!(matches!(orchestrator.calls()[0], Callback::Success { .. }));
}

#[tokio::test]
async fn exactly_one_callback_per_draw() {
    let draws = [0.0, 0.1, 0.5, 0.69, 0.7, 0.71, 0.95, 0.999];
    for draw in draws {
        let (reporter, orchestrator) = build_reporter(draw);
        reporter.report(json!({"taskToken": "t"})).await.unwrap();

        let calls = orchestrator.calls();
        assert_eq!(calls.len(), 1, "draw {draw}");
        match &calls[0] {
            Callback::Success { .. } => assert!(draw < 0.7, "draw {draw}"),
            Callback::Failure { cause, .. } => {
                assert!(draw >= 0.7, "draw {draw}");
                assert!(cause.ends_with(&draw.to_string()));
            }
        }
    }
}

// ── Token handling ───────────────────────────────────────────────

#[tokio::test]
async fn token_is_forwarded_verbatim() {
    let token = "AAAAKgAAAAIAAAAAAAAAAQ+/ab==\n";
    let (reporter, orchestrator) = build_reporter(0.1);
    reporter
        .report(json!({"taskToken": token, "chunk": 3}))
        .await
        .unwrap();

    assert!(matches!(
        &orchestrator.calls()[0],
        Callback::Success { task_token, .. } if task_token == token
    ));
}

#[tokio::test]
async fn missing_token_fails_without_callback() {
    let (reporter, orchestrator) = build_reporter(0.1);

    let err = reporter.report(json!({})).await.unwrap_err();
    assert!(matches!(err, HandlerError::MissingTaskToken));
    assert!(orchestrator.calls().is_empty());
}

#[tokio::test]
async fn missing_token_does_not_consume_a_draw() {
    let orchestrator = Arc::new(RecordingOrchestrator::new());
    let chance = Arc::new(ScriptedChance::new(vec![0.1]));
    let reporter = ChunkReporter::new(orchestrator, chance.clone(), ReporterConfig::default());

    assert!(reporter.report(json!({"chunk": 1})).await.is_err());
    assert_eq!(chance.draws(), 0);
}

#[tokio::test]
async fn non_string_token_is_rejected() {
    let (reporter, orchestrator) = build_reporter(0.1);

    let err = reporter.report(json!({"taskToken": 7})).await.unwrap_err();
    assert!(matches!(err, HandlerError::InvalidTaskToken { .. }));
    assert!(orchestrator.calls().is_empty());
}

// ── Transport errors ─────────────────────────────────────────────

#[tokio::test]
async fn success_callback_error_propagates() {
    let orchestrator = Arc::new(RecordingOrchestrator::rejecting("TaskTimedOut"));
    let reporter = ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(FixedChance(0.1)),
        ReporterConfig::default(),
    );

    let err = reporter.report(json!({"taskToken": "t"})).await.unwrap_err();
    match err {
        HandlerError::Callback { operation, cause } => {
            assert_eq!(operation, "success");
            assert_eq!(cause.to_string(), "TaskTimedOut");
        }
        other => panic!("expected Callback error, got {other:?}"),
    }
    // Sent once, not retried.
    assert_eq!(orchestrator.calls().len(), 1);
}

#[tokio::test]
async fn failure_callback_error_propagates() {
    let orchestrator = Arc::new(RecordingOrchestrator::rejecting("InvalidToken"));
    let reporter = ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(FixedChance(0.95)),
        ReporterConfig::default(),
    );

    let err = reporter.report(json!({"taskToken": "t"})).await.unwrap_err();
    assert!(matches!(err, HandlerError::Callback { operation: "failure", .. }));
    assert_eq!(orchestrator.calls().len(), 1);
}

// ── Configuration ────────────────────────────────────────────────

#[tokio::test]
async fn custom_threshold_moves_the_boundary() {
    let orchestrator = Arc::new(RecordingOrchestrator::new());
    let reporter = ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(FixedChance(0.8)),
        ReporterConfig::new(0.9).unwrap(),
    );

    reporter.report(json!({"taskToken": "t"})).await.unwrap();
    assert!(matches!(orchestrator.calls()[0], Callback::Success { .. }));
}

// ── Concurrency ──────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_invocations_each_send_one_callback() {
    let orchestrator = Arc::new(RecordingOrchestrator::new());
    let reporter = Arc::new(ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(ScriptedChance::new(vec![0.1, 0.95])),
        ReporterConfig::default(),
    ));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let reporter = Arc::clone(&reporter);
            tokio::spawn(async move {
                reporter
                    .report(json!({"taskToken": format!("chunk-{i}")}))
                    .await
            })
        })
        .collect();

    let outcomes: Vec<Outcome> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 10);

    let calls = orchestrator.calls();
    assert_eq!(calls.len(), 20);
    let mut tokens: Vec<String> = calls
        .iter()
        .map(|c| match c {
            Callback::Success { task_token, .. } | Callback::Failure { task_token, .. } => {
                task_token.clone()
            }
        })
        .collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 20);
}

#[tokio::test]
async fn random_source_sends_one_callback_either_way() {
    let orchestrator = Arc::new(RecordingOrchestrator::new());
    let reporter = ChunkReporter::new(
        orchestrator.clone(),
        Arc::new(ThreadRngChance),
        ReporterConfig::default(),
    );

    for _ in 0..50 {
        reporter.report(json!({"taskToken": "t"})).await.unwrap();
    }
    assert_eq!(orchestrator.calls().len(), 50);
}

// ── Local invocation ─────────────────────────────────────────────

#[tokio::test]
async fn invoke_report_returns_outcome() {
    let (reporter, _orchestrator) = build_reporter(0.95);
    let result = invoke(HandlerKind::Report, json!({"taskToken": "abc123"}), &reporter)
        .await
        .unwrap();
    assert_eq!(result, json!({"outcome": "failed", "chance": 0.95}));
}

#[tokio::test]
async fn invoke_split_never_calls_back() {
    let (reporter, orchestrator) = build_reporter(0.1);
    let result = invoke(HandlerKind::Split, json!({}), &reporter).await.unwrap();
    assert_eq!(
        result,
        json!({"msg": "OK, the doc is split; next each chunk should be processed"})
    );
    assert!(orchestrator.calls().is_empty());
}
