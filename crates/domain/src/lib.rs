//! # motehub-domain
//!
//! Pure domain model for the motehub mote control plane.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Mote addresses** and the value validators used at every boundary
//! - Define **Motes** (sensor/actuator endpoints and their last telemetry)
//! - Define **Telemetry** (the `typeCode,value` wire payload sent by motes)
//! - Define **Actuator commands** (LED/valve effects and their wire encoding)
//! - Define **Automations** (sensor reading → actuator effect rules)
//! - Define the **operator command grammar**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod address;
pub mod automation;
pub mod command;
pub mod mote;
pub mod telemetry;
pub mod validation;
