//! gRPC client wrapper for the coordinator service.

mod coordinator;

pub use coordinator::CoordinatorClient;
