//! Pacing and failure semantics of the membership diff engine.

mod helpers;

use ccroster_client::engine::{EngineSettings, MembershipDiffEngine};
use ccroster_client::error::ClientError;
use ccroster_client::pacing::FailurePolicy;
use ccroster_core::{MembershipDiff, UserId};
use helpers::fake_service::{ids, FakeService};
use std::time::Duration;

const TOLERANCE: Duration = Duration::from_millis(5);

fn user() -> UserId {
    UserId::from("42")
}

fn assert_near(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        actual >= expected && actual < expected + TOLERANCE,
        "dispatched at {actual:?}, expected {expected:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_adds_and_removes_paced_independently() {
    let service = FakeService::new(Vec::new(), &[1, 2]);
    let engine = MembershipDiffEngine::new(&service, EngineSettings::default());
    let diff = MembershipDiff::between(&ids(&[1, 2]), &ids(&[3, 4, 5]));

    let summary = engine.apply(&user(), &diff).await.unwrap();
    assert_eq!(summary.added, 3);
    assert_eq!(summary.removed, 2);

    let adds = service.calls_for(true);
    let removes = service.calls_for(false);
    for (call, expected) in adds.iter().zip([0, 325, 650]) {
        assert_near(call.at, expected);
    }
    for (call, expected) in removes.iter().zip([0, 750]) {
        assert_near(call.at, expected);
    }
    assert_eq!(service.memberships(), ids(&[3, 4, 5]));
}

#[tokio::test(start_paused = true)]
async fn test_both_directions_start_together() {
    let service = FakeService::new(Vec::new(), &[9]);
    let engine = MembershipDiffEngine::new(&service, EngineSettings::default());
    let diff = MembershipDiff::between(&ids(&[9]), &ids(&[1]));

    engine.apply(&user(), &diff).await.unwrap();

    let calls = service.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.at < TOLERANCE));
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_order_follows_sorted_ids() {
    let service = FakeService::new(Vec::new(), &[]);
    let engine = MembershipDiffEngine::new(&service, EngineSettings::default());
    let diff = MembershipDiff::between(&ids(&[]), &ids(&[30, 10, 20]));

    engine.apply(&user(), &diff).await.unwrap();

    let order: Vec<String> = service
        .calls()
        .iter()
        .map(|c| c.group_id.to_string())
        .collect();
    assert_eq!(order, vec!["10", "20", "30"]);
    let times: Vec<Duration> = service.calls().iter().map(|c| c.at).collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test(start_paused = true)]
async fn test_failure_runs_remaining_calls_by_default() {
    let service = FakeService::new(Vec::new(), &[]).failing_on(&[1]);
    let engine = MembershipDiffEngine::new(&service, EngineSettings::default());
    let diff = MembershipDiff::between(&ids(&[]), &ids(&[1, 2, 3]));

    let err = engine.apply(&user(), &diff).await.unwrap_err();

    match err {
        ClientError::ApplyFailed {
            failed, attempted, ..
        } => {
            assert_eq!(failed, 1);
            assert_eq!(attempted, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(service.calls().len(), 3);
    // Successful calls are not rolled back
    assert_eq!(service.memberships(), ids(&[2, 3]));
}

#[tokio::test(start_paused = true)]
async fn test_apply_error_carries_first_failure() {
    let service = FakeService::new(Vec::new(), &[]).failing_on(&[2, 3]);
    let engine = MembershipDiffEngine::new(&service, EngineSettings::default());
    let diff = MembershipDiff::between(&ids(&[]), &ids(&[1, 2, 3]));

    let err = engine.apply(&user(), &diff).await.unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().starts_with("2 of 3"));
    assert!(err.to_string().contains("group_id=2"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_pending_skips_later_calls_across_directions() {
    let service = FakeService::new(Vec::new(), &[7, 8, 9]).failing_on(&[1]);
    let settings = EngineSettings {
        failure_policy: FailurePolicy::CancelPending,
        ..EngineSettings::default()
    };
    let engine = MembershipDiffEngine::new(&service, settings);
    let diff = MembershipDiff::between(&ids(&[7, 8, 9]), &ids(&[1, 2, 3]));

    let err = engine.apply(&user(), &diff).await.unwrap_err();

    // Only the calls due at t=0 fired: add 1 (failed) and remove 7
    let fired: Vec<String> = service
        .calls()
        .iter()
        .map(|c| c.group_id.to_string())
        .collect();
    assert_eq!(fired.len(), 2);
    assert!(fired.contains(&"1".to_string()));
    assert!(fired.contains(&"7".to_string()));
    assert!(matches!(
        err,
        ClientError::ApplyFailed {
            failed: 1,
            attempted: 2,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_custom_spacing() {
    let service = FakeService::new(Vec::new(), &[]);
    let settings = EngineSettings {
        add_spacing: Duration::from_millis(50),
        ..EngineSettings::default()
    };
    let engine = MembershipDiffEngine::new(&service, settings);
    let diff = MembershipDiff::between(&ids(&[]), &ids(&[1, 2, 3]));

    engine.apply(&user(), &diff).await.unwrap();

    for (call, expected) in service.calls().iter().zip([0, 50, 100]) {
        assert_near(call.at, expected);
    }
}
