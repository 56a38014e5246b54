//! # motehub-app
//!
//! Application layer — in-process state, use-cases and **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ActuatorGateway` — deliver an actuator command to a mote
//! - Provide **in-process state** that doesn't need IO:
//!   - `MoteRegistry` — last known telemetry per mote address
//!   - `AutomationTable` — automation rules keyed by source mote
//!   - `ServerContext` — shared handle over both tables plus the verbose flag
//! - Define **driving/inbound use-cases**:
//!   - `IngestService` — decode a datagram, upsert the registry, run automations
//!   - `OperatorService` — execute one parsed operator command
//!   - `AutomationService` — create, remove and list automations
//!   - `AutomationEngine` — evaluate a source's rules against a fresh reading
//!   - `LivenessSweeper` — periodically evict silent motes
//!
//! ## Dependency rule
//! Depends on `motehub-domain` only (plus `tokio` for timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod automation_table;
pub mod context;
pub mod ports;
pub mod registry;
pub mod services;
pub mod sweeper;
