//! Task and content types exchanged with the coordinator.

use crate::error::CoreError;
use crate::generated::quarry_v1 as proto;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to the content a task operates on. Resolved to raw bytes by a
/// `ContentFetcher` implementation on the agent side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSource {
    pub id: String,
    pub storage_url: String,
    pub mime: String,
    pub labels: HashMap<String, String>,
}

/// One unit of assigned work. Arrives only over the dispatch channel and is
/// read-only to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub id: String,
    /// Opaque JSON parameter payload; parsed only inside the executor.
    pub input_params: String,
    pub content: ContentSource,
}

/// A typed annotation attached to a derived content item (an embedding
/// vector, an attribute document, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: String,
    pub name: String,
    /// JSON payload.
    pub data: String,
}

/// One derived content item produced by an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub mime: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Terminal status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed,
}

/// Terminal result of one task: the status plus, on success, the ordered
/// sequence of derived content. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task_id: String,
    pub status: TaskStatus,
    pub content: Vec<ContentItem>,
    pub error: Option<String>,
}

impl TaskOutcome {
    pub fn succeeded(task_id: impl Into<String>, content: Vec<ContentItem>) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Succeeded,
            content,
            error: None,
        }
    }

    pub fn failed(task_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Failed,
            content: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

impl TryFrom<proto::Task> for TaskDescriptor {
    type Error = CoreError;

    fn try_from(task: proto::Task) -> Result<Self, Self::Error> {
        let content = task
            .content
            .ok_or_else(|| CoreError::Other(format!("task {} has no content source", task.id)))?;
        Ok(TaskDescriptor {
            id: task.id,
            input_params: task.input_params,
            content: ContentSource {
                id: content.id,
                storage_url: content.storage_url,
                mime: content.mime,
                labels: content.labels,
            },
        })
    }
}

impl From<TaskDescriptor> for proto::Task {
    fn from(task: TaskDescriptor) -> Self {
        proto::Task {
            id: task.id,
            input_params: task.input_params,
            content: Some(proto::ContentSource {
                id: task.content.id,
                storage_url: task.content.storage_url,
                mime: task.content.mime,
                labels: task.content.labels,
            }),
        }
    }
}

impl From<ContentItem> for proto::ContentItem {
    fn from(item: ContentItem) -> Self {
        proto::ContentItem {
            mime: item.mime,
            data: item.data,
            labels: item.labels,
            features: item
                .features
                .into_iter()
                .map(|f| proto::Feature {
                    kind: f.kind,
                    name: f.name,
                    data: f.data,
                })
                .collect(),
        }
    }
}

impl From<proto::ContentItem> for ContentItem {
    fn from(item: proto::ContentItem) -> Self {
        ContentItem {
            mime: item.mime,
            data: item.data,
            labels: item.labels,
            features: item
                .features
                .into_iter()
                .map(|f| Feature {
                    kind: f.kind,
                    name: f.name,
                    data: f.data,
                })
                .collect(),
        }
    }
}

impl From<TaskStatus> for proto::TaskOutcomeCode {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Succeeded => proto::TaskOutcomeCode::Succeeded,
            TaskStatus::Failed => proto::TaskOutcomeCode::Failed,
        }
    }
}

/// Serde adapter: binary content travels base64-encoded on the worker's JSON
/// protocol.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> proto::Task {
        proto::Task {
            id: "t1".to_string(),
            input_params: r#"{"chunk_size": 512}"#.to_string(),
            content: Some(proto::ContentSource {
                id: "c1".to_string(),
                storage_url: "file:///tmp/doc.txt".to_string(),
                mime: "text/plain".to_string(),
                labels: [("source".to_string(), "upload".to_string())]
                    .into_iter()
                    .collect(),
            }),
        }
    }

    #[test]
    fn test_task_descriptor_from_proto() {
        let descriptor = TaskDescriptor::try_from(sample_task()).unwrap();
        assert_eq!(descriptor.id, "t1");
        assert_eq!(descriptor.content.storage_url, "file:///tmp/doc.txt");
        assert_eq!(
            descriptor.content.labels.get("source"),
            Some(&"upload".to_string())
        );
    }

    #[test]
    fn test_task_without_content_rejected() {
        let task = proto::Task {
            id: "t2".to_string(),
            input_params: "{}".to_string(),
            content: None,
        };
        let err = TaskDescriptor::try_from(task).unwrap_err();
        assert!(err.to_string().contains("t2"));
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = TaskOutcome::succeeded("t1", Vec::new());
        assert!(ok.is_success());
        assert!(ok.error.is_none());

        let failed = TaskOutcome::failed("t1", "fetch failed");
        assert!(!failed.is_success());
        assert_eq!(failed.error.as_deref(), Some("fetch failed"));
        assert!(failed.content.is_empty());
    }

    #[test]
    fn test_content_item_json_base64() {
        let item = ContentItem {
            mime: "text/plain".to_string(),
            data: b"hello world".to_vec(),
            labels: HashMap::new(),
            features: vec![Feature {
                kind: "embedding".to_string(),
                name: "embeddings".to_string(),
                data: "[0.1, 0.2]".to_string(),
            }],
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["data"], "aGVsbG8gd29ybGQ=");

        let back: ContentItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_status_to_proto_code() {
        assert_eq!(
            proto::TaskOutcomeCode::from(TaskStatus::Succeeded),
            proto::TaskOutcomeCode::Succeeded
        );
        assert_eq!(
            proto::TaskOutcomeCode::from(TaskStatus::Failed),
            proto::TaskOutcomeCode::Failed
        );
    }
}
