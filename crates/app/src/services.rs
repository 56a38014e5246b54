//! Application services — use-case implementations.
//!
//! Services share the in-memory tables through [`ServerContext`](crate::context::ServerContext)
//! and accept port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod automation_service;
pub mod ingest_service;
pub mod operator_service;
