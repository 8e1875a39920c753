//! Job configuration document model for GridPilot
//!
//! This crate defines the structured job-configuration document that the
//! configuration loader produces and the rest of the client toolchain
//! consumes:
//!
//! - Typed fields for job sizing, ports, environment, update policy and
//!   health-check policy
//! - Legacy fields that are still honored but deprecated
//! - Derived predicates such as [`JobConfiguration::is_dedicated`]
//! - The opaque hook callable type carried by a populated document
//!
//! The model is deliberately free of policy logic: validation and default
//! injection live in the `preflight-engine` crate. Documents arrive here
//! already parsed (JSON/YAML via `serde`); this crate never reads files or
//! talks to the network.

pub mod hook;
pub mod job;

pub use hook::*;
pub use job::*;
