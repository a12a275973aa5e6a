//! # Quarry Core
//!
//! Shared foundation for the quarry executor agent: the coordinator wire
//! protocol (protobuf definitions plus checked-in generated code), the domain
//! types the agent exchanges with the coordinator, the gRPC client wrapper,
//! and the backoff machinery used for registration, reconnection, and outcome
//! reporting.
//!
//! ## Modules
//!
//! - [`generated`] - gRPC/protobuf generated code
//! - [`capability`] - capability self-description and proto conversions
//! - [`task`] - task descriptors, derived content, and outcomes
//! - [`client`] - gRPC client wrapper for the coordinator service
//! - [`backoff`] - retry backoff policies
//! - [`error`] - core error types

pub mod backoff;
pub mod capability;
pub mod client;
pub mod error;
pub mod generated;
pub mod task;

pub use backoff::BackoffPolicy;
pub use capability::{CapabilityDescriptor, EmbeddingSchema, OutputSchema};
pub use client::CoordinatorClient;
pub use error::{CoreError, CoreResult};
pub use task::{ContentItem, ContentSource, Feature, TaskDescriptor, TaskOutcome, TaskStatus};
