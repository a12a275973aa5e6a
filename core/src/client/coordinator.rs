//! CoordinatorClient - gRPC client for executor registration, the duplex
//! heartbeat/dispatch channel, and outcome reporting.

use crate::capability::CapabilityDescriptor;
use crate::error::{CoreError, CoreResult};
use crate::generated::quarry_v1::{
    self, HeartbeatRequest, HeartbeatResponse, RegisterExecutorRequest, ReportTaskOutcomeRequest,
};
use crate::task::TaskOutcome;
use tonic::codec::Streaming;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

type Stub = quarry_v1::coordinator_service_client::CoordinatorServiceClient<Channel>;

/// Client for the CoordinatorService. Cheap to clone; all clones share one
/// underlying HTTP/2 channel.
#[derive(Debug, Clone)]
pub struct CoordinatorClient {
    stub: Stub,
}

impl CoordinatorClient {
    /// Create a client for the given endpoint URI (e.g. `http://localhost:8950`).
    ///
    /// The connection is established lazily on the first call, so a
    /// coordinator that is not up yet surfaces as a retryable call error
    /// rather than a constructor failure.
    pub fn new(endpoint: &str) -> CoreResult<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())?.connect_lazy();
        Ok(Self {
            stub: Stub::new(channel),
        })
    }

    /// Send identity + capability to the coordinator once.
    pub async fn register_executor(
        &mut self,
        executor_id: &str,
        capability: CapabilityDescriptor,
    ) -> CoreResult<()> {
        let request = RegisterExecutorRequest {
            executor_id: executor_id.to_string(),
            capability: Some(capability.into()),
        };
        let response = self.stub.register_executor(request).await?.into_inner();
        debug!(executor_id = %response.executor_id, "executor registered");
        Ok(())
    }

    /// Open the duplex heartbeat/dispatch call. The caller drives `outbound`
    /// (one `HeartbeatRequest` per interval) and reads task batches from the
    /// returned stream.
    pub async fn heartbeat(
        &mut self,
        outbound: impl tonic::IntoStreamingRequest<Message = HeartbeatRequest>,
    ) -> CoreResult<Streaming<HeartbeatResponse>> {
        let response = self.stub.heartbeat(outbound).await?;
        Ok(response.into_inner())
    }

    /// Report the terminal outcome of one task.
    pub async fn report_task_outcome(
        &mut self,
        executor_id: &str,
        outcome: &TaskOutcome,
    ) -> CoreResult<()> {
        let request = ReportTaskOutcomeRequest {
            executor_id: executor_id.to_string(),
            task_id: outcome.task_id.clone(),
            outcome: quarry_v1::TaskOutcomeCode::from(outcome.status) as i32,
            content: outcome.content.iter().cloned().map(Into::into).collect(),
            error_message: outcome.error.clone().unwrap_or_default(),
        };
        self.stub.report_task_outcome(request).await?;
        debug!(task_id = %outcome.task_id, "task outcome reported");
        Ok(())
    }
}

impl CoordinatorClient {
    /// Validate an endpoint string without connecting.
    pub fn validate_endpoint(endpoint: &str) -> CoreResult<()> {
        Endpoint::from_shared(endpoint.to_string())
            .map(|_| ())
            .map_err(|e| CoreError::InvalidConfiguration(format!("endpoint {endpoint}: {e}")))
    }
}
