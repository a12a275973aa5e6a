//! End-to-end agent lifecycle tests against an in-process mock coordinator.

mod support;

use quarry_agent::{AgentConfig, AgentState, ExecutorAgent};
use quarry_core::generated::quarry_v1::TaskOutcomeCode;
use quarry_core::{BackoffPolicy, CapabilityDescriptor};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use support::{
    spawn_coordinator, task, wait_for, CoordinatorState, MemFetcher, RecordingExtractor,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

fn capability() -> CapabilityDescriptor {
    serde_json::from_value(serde_json::json!({"name": "recording"})).unwrap()
}

struct Harness {
    extractor: Arc<RecordingExtractor>,
    shutdown: CancellationToken,
    state: watch::Receiver<AgentState>,
    handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    async fn launch(
        coordinator: Arc<CoordinatorState>,
        tweak: impl FnOnce(AgentConfig) -> AgentConfig,
    ) -> Self {
        let endpoint = spawn_coordinator(coordinator.clone()).await;
        let config = tweak(
            AgentConfig::new(endpoint)
                .with_heartbeat_interval(Duration::from_millis(50))
                .with_registration_backoff(BackoffPolicy::fixed(Duration::from_millis(30)))
                .with_shutdown_grace(Duration::from_secs(2)),
        );

        let extractor = Arc::new(RecordingExtractor::default());
        let agent = ExecutorAgent::new(
            config,
            capability(),
            Arc::new(MemFetcher),
            extractor.clone(),
        )
        .expect("agent construction");

        let shutdown = agent.shutdown_token();
        let state = agent.state();
        let handle = tokio::spawn(async move {
            agent.run().await.expect("agent run");
        });

        Self {
            extractor,
            shutdown,
            state,
            handle,
        }
    }

    fn is_streaming(&self) -> bool {
        *self.state.borrow() == AgentState::Streaming
    }

    async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("agent shut down within grace")
            .expect("agent task join");
    }
}

#[tokio::test]
async fn registration_is_retried_until_success() {
    let coordinator = Arc::new(CoordinatorState::default());
    coordinator.register_failures.store(3, Ordering::SeqCst);

    let harness = Harness::launch(coordinator.clone(), |c| c).await;

    assert!(wait_for(Duration::from_secs(5), || harness.is_streaming()).await);
    // Three refused attempts, then the one that registered.
    assert_eq!(coordinator.register_calls.load(Ordering::SeqCst), 4);
    assert_eq!(coordinator.sessions.load(Ordering::SeqCst), 1);

    harness.stop().await;
}

#[tokio::test]
async fn heartbeats_follow_the_configured_cadence() {
    let coordinator = Arc::new(CoordinatorState::default());
    let harness = Harness::launch(coordinator.clone(), |c| {
        c.with_heartbeat_interval(Duration::from_millis(100))
    })
    .await;

    assert!(wait_for(Duration::from_secs(5), || harness.is_streaming()).await);

    let before = coordinator.heartbeats.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;
    let delta = coordinator.heartbeats.load(Ordering::SeqCst) - before;

    // floor(1000ms / 100ms) = 10, with scheduling slack on either side.
    assert!((8..=12).contains(&delta), "heartbeat count {delta}");

    harness.stop().await;
}

#[tokio::test]
async fn successful_task_reports_succeeded_with_content() {
    let coordinator = Arc::new(CoordinatorState::default());
    coordinator.queue_batch(vec![task("t1", "mem://ok")]);

    let harness = Harness::launch(coordinator.clone(), |c| c).await;

    assert!(
        wait_for(Duration::from_secs(5), || {
            !coordinator.reports_for("t1").is_empty()
        })
        .await
    );

    let reports = coordinator.reports_for("t1");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, TaskOutcomeCode::Succeeded as i32);
    assert_eq!(reports[0].content.len(), 1);
    assert_eq!(reports[0].content[0].data, b"derived");
    assert_eq!(harness.extractor.invoked_for("t1"), 1);

    harness.stop().await;
}

#[tokio::test]
async fn fetch_failure_fails_task_without_invoking_extractor() {
    let coordinator = Arc::new(CoordinatorState::default());
    coordinator.queue_batch(vec![task("t2", "s3://unreachable/key")]);

    let harness = Harness::launch(coordinator.clone(), |c| c).await;

    assert!(
        wait_for(Duration::from_secs(5), || {
            !coordinator.reports_for("t2").is_empty()
        })
        .await
    );

    let reports = coordinator.reports_for("t2");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, TaskOutcomeCode::Failed as i32);
    assert!(reports[0].error_message.contains("content fetch failed"));
    assert!(reports[0].content.is_empty());
    assert_eq!(harness.extractor.invoked_for("t2"), 0);

    harness.stop().await;
}

#[tokio::test]
async fn redelivery_after_reconnect_is_dropped() {
    let coordinator = Arc::new(CoordinatorState::default());
    coordinator.queue_batch(vec![task("t1", "mem://ok")]);
    coordinator.queue_session_failure();
    // Redelivered t1 plus a genuinely new task after the reconnect.
    coordinator.queue_batch(vec![task("t1", "mem://ok"), task("t3", "mem://ok")]);

    let harness = Harness::launch(coordinator.clone(), |c| c).await;

    assert!(
        wait_for(Duration::from_secs(10), || {
            coordinator.sessions.load(Ordering::SeqCst) >= 2
                && !coordinator.reports_for("t3").is_empty()
        })
        .await
    );

    // Exactly one run and one report for t1 despite the redelivery.
    assert_eq!(harness.extractor.invoked_for("t1"), 1);
    assert_eq!(coordinator.reports_for("t1").len(), 1);
    assert_eq!(coordinator.reports_for("t3").len(), 1);

    harness.stop().await;
}

#[tokio::test]
async fn duplicate_ids_within_one_batch_run_once() {
    let coordinator = Arc::new(CoordinatorState::default());
    coordinator.queue_batch(vec![task("t1", "mem://ok"), task("t1", "mem://ok")]);

    let harness = Harness::launch(coordinator.clone(), |c| c).await;

    assert!(
        wait_for(Duration::from_secs(5), || {
            !coordinator.reports_for("t1").is_empty()
        })
        .await
    );
    // Give a second run a chance to surface before asserting it never happened.
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(harness.extractor.invoked_for("t1"), 1);
    assert_eq!(coordinator.reports_for("t1").len(), 1);

    harness.stop().await;
}
