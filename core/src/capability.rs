//! Capability self-description.
//!
//! A capability is the one extraction function an agent hosts: a name, the
//! parameter schema it accepts, the media types it consumes, and the schema
//! of every output stream it produces. The descriptor is built once at agent
//! startup from the worker's self-description and sent once at registration.

use crate::error::{CoreError, CoreResult};
use crate::generated::quarry_v1 as proto;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema of an embedding-vector output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSchema {
    /// Vector dimensionality.
    pub dim: u64,
    /// Distance metric the index should use ("cosine", "dot", ...).
    pub distance_metric: String,
}

/// Schema of one named output stream: either an embedding vector or an
/// attribute/metadata document described by a JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSchema {
    Embedding(EmbeddingSchema),
    Attributes(serde_json::Value),
}

/// Static description of what this agent can do. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON schema for the accepted input parameters.
    #[serde(default = "default_params_schema")]
    pub input_params: serde_json::Value,
    #[serde(default)]
    pub input_mime_types: Vec<String>,
    /// Output stream name to schema.
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputSchema>,
}

fn default_params_schema() -> serde_json::Value {
    serde_json::json!({})
}

impl From<OutputSchema> for proto::OutputSchema {
    fn from(schema: OutputSchema) -> Self {
        let schema = match schema {
            OutputSchema::Embedding(e) => {
                proto::output_schema::Schema::Embedding(proto::EmbeddingSchema {
                    distance_metric: e.distance_metric,
                    dim: e.dim,
                })
            }
            OutputSchema::Attributes(v) => proto::output_schema::Schema::Attributes(v.to_string()),
        };
        proto::OutputSchema {
            schema: Some(schema),
        }
    }
}

impl TryFrom<proto::OutputSchema> for OutputSchema {
    type Error = CoreError;

    fn try_from(schema: proto::OutputSchema) -> CoreResult<Self> {
        match schema.schema {
            Some(proto::output_schema::Schema::Embedding(e)) => {
                Ok(OutputSchema::Embedding(EmbeddingSchema {
                    dim: e.dim,
                    distance_metric: e.distance_metric,
                }))
            }
            Some(proto::output_schema::Schema::Attributes(json)) => {
                Ok(OutputSchema::Attributes(serde_json::from_str(&json)?))
            }
            None => Err(CoreError::Other("output schema is empty".to_string())),
        }
    }
}

impl From<CapabilityDescriptor> for proto::Capability {
    fn from(descriptor: CapabilityDescriptor) -> Self {
        proto::Capability {
            name: descriptor.name,
            description: descriptor.description,
            input_params_schema: descriptor.input_params.to_string(),
            input_mime_types: descriptor.input_mime_types,
            outputs: descriptor
                .outputs
                .into_iter()
                .map(|(name, schema)| (name, schema.into()))
                .collect(),
        }
    }
}

impl TryFrom<proto::Capability> for CapabilityDescriptor {
    type Error = CoreError;

    fn try_from(capability: proto::Capability) -> CoreResult<Self> {
        let input_params = if capability.input_params_schema.is_empty() {
            default_params_schema()
        } else {
            serde_json::from_str(&capability.input_params_schema)?
        };
        let outputs = capability
            .outputs
            .into_iter()
            .map(|(name, schema)| Ok((name, schema.try_into()?)))
            .collect::<CoreResult<BTreeMap<_, _>>>()?;
        Ok(CapabilityDescriptor {
            name: capability.name,
            description: capability.description,
            input_params,
            input_mime_types: capability.input_mime_types,
            outputs,
        })
    }
}
