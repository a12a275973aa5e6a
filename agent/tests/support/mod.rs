//! In-process mock coordinator for agent lifecycle tests.
//!
//! Serves the real gRPC surface on an ephemeral port so the tests drive the
//! agent end to end: registration (with scripted failures), the duplex
//! heartbeat/dispatch stream (with scripted batches and teardowns), and
//! outcome reporting.

use async_trait::async_trait;
use quarry_agent::extractor::{ExtractionError, Extractor};
use quarry_agent::fetch::{ContentFetcher, FetchError};
use quarry_core::generated::quarry_v1::coordinator_service_server::{
    CoordinatorService, CoordinatorServiceServer,
};
use quarry_core::generated::quarry_v1::{
    ContentSource as ProtoContentSource, HeartbeatRequest, HeartbeatResponse,
    RegisterExecutorRequest, RegisterExecutorResponse, ReportTaskOutcomeRequest,
    ReportTaskOutcomeResponse, Task,
};
use quarry_core::{CapabilityDescriptor, ContentItem, ContentSource};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, TcpListenerStream};
use tonic::{Request, Response, Status, Streaming};

/// What the coordinator does in response to one heartbeat.
enum Directive {
    /// Deliver a batch of tasks.
    Deliver(Vec<Task>),
    /// Tear the session down with a transport-style error.
    FailSession,
}

#[derive(Default)]
pub struct CoordinatorState {
    /// Number of register calls left to fail with `unavailable`.
    pub register_failures: AtomicU32,
    pub register_calls: AtomicU32,
    pub heartbeats: AtomicU32,
    pub sessions: AtomicU32,
    directives: Mutex<VecDeque<Directive>>,
    pub reports: Mutex<Vec<ReportTaskOutcomeRequest>>,
}

impl CoordinatorState {
    pub fn queue_batch(&self, tasks: Vec<Task>) {
        self.directives
            .lock()
            .unwrap()
            .push_back(Directive::Deliver(tasks));
    }

    pub fn queue_session_failure(&self) {
        self.directives
            .lock()
            .unwrap()
            .push_back(Directive::FailSession);
    }

    pub fn reports_for(&self, task_id: &str) -> Vec<ReportTaskOutcomeRequest> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|report| report.task_id == task_id)
            .cloned()
            .collect()
    }
}

struct MockCoordinator {
    state: Arc<CoordinatorState>,
}

#[async_trait]
impl CoordinatorService for MockCoordinator {
    async fn register_executor(
        &self,
        request: Request<RegisterExecutorRequest>,
    ) -> Result<Response<RegisterExecutorResponse>, Status> {
        self.state.register_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.state.register_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.state
                .register_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(Status::unavailable("simulated outage"));
        }

        Ok(Response::new(RegisterExecutorResponse {
            executor_id: request.into_inner().executor_id,
        }))
    }

    type HeartbeatStream = ReceiverStream<Result<HeartbeatResponse, Status>>;

    async fn heartbeat(
        &self,
        request: Request<Streaming<HeartbeatRequest>>,
    ) -> Result<Response<Self::HeartbeatStream>, Status> {
        self.state.sessions.fetch_add(1, Ordering::SeqCst);

        let mut inbound = request.into_inner();
        let state = self.state.clone();
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            while let Ok(Some(heartbeat)) = inbound.message().await {
                state.heartbeats.fetch_add(1, Ordering::SeqCst);

                let directive = state.directives.lock().unwrap().pop_front();
                let message = match directive {
                    Some(Directive::FailSession) => {
                        let _ = tx.send(Err(Status::unavailable("session torn down"))).await;
                        break;
                    }
                    Some(Directive::Deliver(tasks)) => HeartbeatResponse {
                        executor_id: heartbeat.executor_id,
                        tasks,
                    },
                    None => HeartbeatResponse {
                        executor_id: heartbeat.executor_id,
                        tasks: Vec::new(),
                    },
                };
                if tx.send(Ok(message)).await.is_err() {
                    break;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    async fn report_task_outcome(
        &self,
        request: Request<ReportTaskOutcomeRequest>,
    ) -> Result<Response<ReportTaskOutcomeResponse>, Status> {
        self.state
            .reports
            .lock()
            .unwrap()
            .push(request.into_inner());
        Ok(Response::new(ReportTaskOutcomeResponse {}))
    }
}

/// Serve a mock coordinator on an ephemeral port; returns its endpoint URI.
pub async fn spawn_coordinator(state: Arc<CoordinatorState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(CoordinatorServiceServer::new(MockCoordinator { state }))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .ok();
    });

    format!("http://{addr}")
}

/// Proto task pointing at an in-memory content reference. The task id is
/// carried in the content labels so the recording extractor can attribute
/// invocations.
pub fn task(id: &str, storage_url: &str) -> Task {
    Task {
        id: id.to_string(),
        input_params: "{}".to_string(),
        content: Some(ProtoContentSource {
            id: format!("content-{id}"),
            storage_url: storage_url.to_string(),
            mime: "text/plain".to_string(),
            labels: [("task".to_string(), id.to_string())].into_iter().collect(),
        }),
    }
}

/// Fetcher that serves `mem://ok` and fails everything else.
pub struct MemFetcher;

#[async_trait]
impl ContentFetcher for MemFetcher {
    async fn fetch(&self, source: &ContentSource) -> Result<Vec<u8>, FetchError> {
        if source.storage_url == "mem://ok" {
            Ok(b"document body".to_vec())
        } else {
            Err(FetchError::UnsupportedScheme {
                url: source.storage_url.clone(),
            })
        }
    }
}

/// Extractor that records which task each invocation belonged to and returns
/// a single derived item.
#[derive(Default)]
pub struct RecordingExtractor {
    pub invocations: Mutex<Vec<String>>,
}

impl RecordingExtractor {
    pub fn invoked_for(&self, task_id: &str) -> usize {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == task_id)
            .count()
    }
}

#[async_trait]
impl Extractor for RecordingExtractor {
    async fn describe(&self) -> Result<CapabilityDescriptor, ExtractionError> {
        Ok(serde_json::from_value(serde_json::json!({"name": "recording"})).unwrap())
    }

    async fn extract(
        &self,
        content: ContentItem,
        _params: serde_json::Value,
    ) -> Result<Vec<ContentItem>, ExtractionError> {
        let task_id = content
            .labels
            .get("task")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        self.invocations.lock().unwrap().push(task_id);

        Ok(vec![ContentItem {
            mime: "text/plain".to_string(),
            data: b"derived".to_vec(),
            labels: content.labels.clone(),
            features: Vec::new(),
        }])
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
