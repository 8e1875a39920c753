use std::fmt;

use job_model::JobHook;

/// Ordered list of externally supplied hooks, consulted once per pipeline
/// run.
///
/// The registry is a plain value handed to the gate at construction time.
/// Registration is expected to happen during host startup, before any
/// pipeline run reads it; the list is deliberately unsynchronized, and hosts
/// that register concurrently with pipeline execution get undefined results.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<JobHook>,
    disabled: bool,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook; append order is execution order.
    pub fn register(&mut self, hook: JobHook) {
        self.hooks.push(hook);
    }

    /// Snapshot of the active hooks. Empty while the registry is disabled;
    /// callers never observe the live list.
    pub fn active(&self) -> Vec<JobHook> {
        if self.disabled {
            Vec::new()
        } else {
            self.hooks.clone()
        }
    }

    /// Clears the list and re-enables the registry.
    pub fn reset(&mut self) {
        self.hooks.clear();
        self.disabled = false;
    }

    /// Hides all hooks from [`active`](Self::active) without discarding them.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &format_args!("<{} registered>", self.hooks.len()))
            .field("disabled", &self.disabled)
            .finish()
    }
}
