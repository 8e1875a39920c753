use std::fmt;

/// Advisory notices surfaced while a configuration moves through the
/// pipeline. Notices never abort a run; fatal conditions are
/// [`PreflightError`](crate::error::PreflightError)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DeprecatedCronPolicy,
    DeprecatedDaemonFlag,
    DeprecatedHealthCheckInterval,
    EmptyCronSchedule,
    DefaultEnvironmentInjected { default: String },
    PrimaryPortUnbound { primary_port: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DeprecatedCronPolicy => write!(
                f,
                "The \"cron_policy\" parameter has been renamed to \"cron_collision_policy\".\n\
                 Please update your jobs accordingly."
            ),
            Notice::DeprecatedDaemonFlag => write!(
                f,
                "The \"daemon\" parameter is deprecated in favor of the \"service\" parameter.\n\
                 Please update your job to set service = true instead of daemon = true."
            ),
            Notice::DeprecatedHealthCheckInterval => write!(
                f,
                "The \"health_check_interval_secs\" parameter is deprecated in favor of the\n\
                 \"health_check\" policy. Please update your job to declare a HealthCheckPolicy."
            ),
            Notice::EmptyCronSchedule => write!(
                f,
                "Got a job with an empty string cron schedule. Some scheduler releases\n\
                 interpret this as a cron job; leave the field unset for non-cron jobs."
            ),
            Notice::DefaultEnvironmentInjected { default } => {
                write!(f, "Job did not specify an environment, auto-populating to \"{default}\".")
            }
            Notice::PrimaryPortUnbound { primary_port } => write!(
                f,
                "Announcer specified primary port as \"{primary_port}\" but no process has\n\
                 bound that port. To use it, bind \"{primary_port}\" from a process in your task."
            ),
        }
    }
}

/// Destination for advisory notices.
///
/// Production callers forward notices to the `tracing` subscriber via
/// [`TracingSink`]; tests and embedding hosts record them with
/// [`MemorySink`].
pub trait DiagnosticSink {
    fn notice(&mut self, notice: Notice);
}

/// Forwards notices to the `tracing` subscriber installed by the host.
///
/// The library emits events only; hosts that want the conventional
/// warnings-on-stderr behavior install a subscriber writing there.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notice(&mut self, notice: Notice) {
        match &notice {
            Notice::DefaultEnvironmentInjected { .. } => {
                tracing::info!(notice = %notice, "populating configuration default");
            }
            _ => {
                tracing::warn!(notice = %notice, "configuration warning");
            }
        }
    }
}

/// Records notices in memory, preserving emission order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    notices: Vec<Notice>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl DiagnosticSink for MemorySink {
    fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
