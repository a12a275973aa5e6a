//! HeartbeatSession - the persistent liveness/dispatch channel.
//!
//! One duplex gRPC call carries both directions: a locally driven ticker
//! emits a heartbeat on a fixed cadence, and the coordinator's side of the
//! stream yields batches of newly assigned tasks in arrival order. Any read
//! or write failure tears the whole session down; the caller reconnects from
//! registration. Ordering holds within one message, not across reconnects.

use crate::error::{AgentError, Result};
use quarry_core::generated::quarry_v1::{HeartbeatRequest, HeartbeatResponse};
use quarry_core::{CoordinatorClient, TaskDescriptor};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tonic::codec::Streaming;
use tracing::{debug, warn};

pub struct HeartbeatSession {
    inbound: Streaming<HeartbeatResponse>,
    ticker: JoinHandle<()>,
}

impl HeartbeatSession {
    /// Open the duplex call and start the heartbeat ticker. The first
    /// heartbeat is emitted immediately, then one per `interval`.
    pub async fn open(
        client: &mut CoordinatorClient,
        executor_id: &str,
        interval: Duration,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<HeartbeatRequest>(1);
        let executor_id = executor_id.to_string();

        let ticker = tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                let request = HeartbeatRequest {
                    executor_id: executor_id.clone(),
                };
                // The channel closes when the session is dropped or the
                // transport rejects the stream; either way the ticker is done.
                if tx.send(request).await.is_err() {
                    break;
                }
            }
        });

        let inbound = client
            .heartbeat(ReceiverStream::new(rx))
            .await
            .map_err(AgentError::Session)?;

        debug!(interval = ?interval, "heartbeat session opened");
        Ok(Self { inbound, ticker })
    }

    /// Next batch of tasks, in coordinator-assigned order. `Ok(None)` means
    /// the coordinator closed the stream cleanly; an error means the session
    /// is dead and the caller must reconnect.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<TaskDescriptor>>> {
        match self.inbound.message().await {
            Ok(Some(response)) => {
                let mut tasks = Vec::with_capacity(response.tasks.len());
                for task in response.tasks {
                    match TaskDescriptor::try_from(task) {
                        Ok(descriptor) => tasks.push(descriptor),
                        // A malformed descriptor is the coordinator's bug;
                        // skip it rather than killing the channel.
                        Err(err) => warn!(error = %err, "dropping malformed task"),
                    }
                }
                Ok(Some(tasks))
            }
            Ok(None) => Ok(None),
            Err(status) => Err(AgentError::Session(status.into())),
        }
    }
}

impl Drop for HeartbeatSession {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
