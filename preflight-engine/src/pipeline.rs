use job_model::JobConfiguration;
use tracing::debug;

use crate::bindings::ConfigTransform;
use crate::defaults::inject_default_environment;
use crate::deprecation::{
    warn_on_deprecated_cron_policy, warn_on_deprecated_daemon_flag,
    warn_on_deprecated_health_check_interval, warn_on_empty_cron_schedule,
};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::hooks::HookRegistry;
use crate::validators;

/// One stage of the pre-flight pipeline. The set is closed: the gate knows
/// every stage, and the two sequences below fix their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    HookAttachment,
    BindingApplication,
    DefaultInjection,
    DeprecationCheck,
    PolicyValidation,
}

/// Stages executed by [`PreflightGate::populate`], in order.
pub const POPULATE_SEQUENCE: [PipelineStep; 4] = [
    PipelineStep::HookAttachment,
    PipelineStep::BindingApplication,
    PipelineStep::DefaultInjection,
    PipelineStep::DeprecationCheck,
];

/// Stages executed by [`PreflightGate::validate`], in order.
pub const VALIDATE_SEQUENCE: [PipelineStep; 1] = [PipelineStep::PolicyValidation];

/// Entry point for the pre-flight pipeline.
///
/// A gate owns the hook registry and the binding transforms it was built
/// with; nothing here is global. Hosts construct one gate per deployment
/// surface and run every parsed document through [`populate`](Self::populate)
/// followed by [`validate`](Self::validate).
pub struct PreflightGate {
    hooks: HookRegistry,
    bindings: Vec<Box<dyn ConfigTransform>>,
}

impl PreflightGate {
    pub fn new(hooks: HookRegistry) -> Self {
        Self { hooks, bindings: Vec::new() }
    }

    /// Appends a binding transform; append order is execution order.
    pub fn add_binding(&mut self, binding: Box<dyn ConfigTransform>) {
        self.bindings.push(binding);
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Runs the population stages against a freshly parsed document.
    ///
    /// Mutates the document in place. On error the document may be partially
    /// populated; callers should discard it rather than retry.
    pub fn populate(
        &self,
        config: &mut JobConfiguration,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for step in POPULATE_SEQUENCE {
            self.run_step(step, config, sink)?;
        }
        Ok(())
    }

    /// Runs the validation stages against a populated document.
    pub fn validate(
        &self,
        config: &mut JobConfiguration,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for step in VALIDATE_SEQUENCE {
            self.run_step(step, config, sink)?;
        }
        Ok(())
    }

    fn run_step(
        &self,
        step: PipelineStep,
        config: &mut JobConfiguration,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        debug!(step = ?step, job = %config.name, "running pipeline step");
        match step {
            PipelineStep::HookAttachment => {
                config.hooks = self.hooks.active();
                Ok(())
            }
            PipelineStep::BindingApplication => {
                for binding in &self.bindings {
                    binding.apply(config)?;
                }
                Ok(())
            }
            PipelineStep::DefaultInjection => {
                inject_default_environment(config, sink);
                Ok(())
            }
            PipelineStep::DeprecationCheck => {
                warn_on_deprecated_cron_policy(config, sink);
                warn_on_deprecated_daemon_flag(config, sink);
                warn_on_deprecated_health_check_interval(config, sink);
                warn_on_empty_cron_schedule(config, sink);
                Ok(())
            }
            PipelineStep::PolicyValidation => validators::run_all(config, sink),
        }
    }
}
