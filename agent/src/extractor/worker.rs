//! Process-isolated extraction.
//!
//! The extraction capability runs in a separate OS process so a crash, hang,
//! or runaway allocation in extraction code cannot take down the agent's
//! control loop. The worker command is invoked with a `describe` or `extract`
//! subcommand and speaks JSON over stdin/stdout; binary content is base64 on
//! the wire. A worker past the timeout is killed.

use super::{ExtractionError, Extractor};
use async_trait::async_trait;
use quarry_core::{CapabilityDescriptor, ContentItem};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    content: &'a ContentItem,
    params: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    content: Vec<ContentItem>,
    #[serde(default)]
    error: Option<String>,
}

/// Runs the configured worker command once per call.
#[derive(Debug, Clone)]
pub struct WorkerProcessExtractor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl WorkerProcessExtractor {
    /// `command` is the worker argv (program plus fixed arguments); the
    /// subcommand is appended per call.
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, ExtractionError> {
        let (program, args) = command.split_first().ok_or_else(|| {
            ExtractionError::Spawn(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "worker command is empty",
            ))
        })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    async fn run(
        &self,
        subcommand: &str,
        stdin_payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ExtractionError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(subcommand)
            .stdin(if stdin_payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout must take the worker down
            // with it, not leave it running unsupervised.
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(ExtractionError::Spawn)?;

        if let Some(payload) = stdin_payload {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                ExtractionError::Spawn(std::io::Error::other("worker stdin unavailable"))
            })?;
            // Feed stdin from a separate task so a worker that interleaves
            // reading and writing cannot deadlock against us.
            tokio::spawn(async move {
                let _ = stdin.write_all(&payload).await;
                let _ = stdin.shutdown().await;
            });
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout))?
            .map_err(ExtractionError::Spawn)?;

        if !output.status.success() {
            return Err(ExtractionError::WorkerFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(
            program = %self.program,
            subcommand,
            stdout_bytes = output.stdout.len(),
            "worker finished"
        );
        Ok(output.stdout)
    }
}

#[async_trait]
impl Extractor for WorkerProcessExtractor {
    async fn describe(&self) -> Result<CapabilityDescriptor, ExtractionError> {
        let stdout = self.run("describe", None).await?;
        serde_json::from_slice(&stdout).map_err(ExtractionError::InvalidOutput)
    }

    async fn extract(
        &self,
        content: ContentItem,
        params: serde_json::Value,
    ) -> Result<Vec<ContentItem>, ExtractionError> {
        let request = serde_json::to_vec(&ExtractRequest {
            content: &content,
            params: &params,
        })
        .map_err(ExtractionError::InvalidOutput)?;

        let stdout = self.run("extract", Some(request)).await?;
        let response: ExtractResponse =
            serde_json::from_slice(&stdout).map_err(ExtractionError::InvalidOutput)?;

        match response.error {
            Some(message) => Err(ExtractionError::Reported(message)),
            None => Ok(response.content),
        }
    }
}
