//! Pre-flight gate for GridPilot job configurations
//!
//! This crate runs freshly parsed job documents through a fixed two-phase
//! pipeline before they reach the scheduler:
//! - **Populate**: hook attachment, binding application, default injection,
//!   deprecation checks
//! - **Validate**: policy validation (health-check exclusivity, update
//!   policy bounds, announce rules, environment naming)
//!
//! Population mutates the document in place and reports advisory findings
//! through a [`DiagnosticSink`]; validation is fail-fast and returns the
//! first [`PreflightError`] it hits.
//!
//! # Example
//!
//! ```rust
//! use job_model::{JobConfiguration, UpdatePolicy};
//! use preflight_engine::{HookRegistry, MemorySink, PreflightGate};
//!
//! let mut registry = HookRegistry::new();
//! registry.register(std::sync::Arc::new(|_| Ok(())));
//!
//! let gate = PreflightGate::new(registry);
//! let mut config = JobConfiguration::new(
//!     "labrat",
//!     4,
//!     UpdatePolicy { max_total_failures: 1, watch_secs: 61 },
//! );
//!
//! let mut sink = MemorySink::new();
//! gate.populate(&mut config, &mut sink)?;
//! gate.validate(&mut config, &mut sink)?;
//!
//! assert_eq!(config.environment.as_deref(), Some("devel"));
//! assert_eq!(config.hooks.len(), 1);
//! # Ok::<(), preflight_engine::PreflightError>(())
//! ```

pub mod bindings;
pub mod defaults;
pub mod deprecation;
pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod pipeline;
pub mod validators;

pub use bindings::ConfigTransform;
pub use diagnostics::{DiagnosticSink, MemorySink, Notice, TracingSink};
pub use error::{PreflightError, Result};
pub use hooks::HookRegistry;
pub use pipeline::{PipelineStep, PreflightGate, POPULATE_SEQUENCE, VALIDATE_SEQUENCE};
