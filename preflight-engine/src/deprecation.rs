//! Advisory checks for obsolete configuration fields.
//!
//! Every check here surfaces a warning and nothing else: the legacy value
//! still takes effect downstream. The one legacy concern that is fatal
//! (mixing `health_check_interval_secs` with a `health_check` policy) lives
//! with the validators instead, because the two mechanisms cannot be
//! reconciled.

use job_model::JobConfiguration;

use crate::diagnostics::{DiagnosticSink, Notice};

pub fn warn_on_deprecated_cron_policy(config: &JobConfiguration, sink: &mut dyn DiagnosticSink) {
    if config.cron_policy.as_deref().is_some_and(|v| !v.is_empty()) {
        sink.notice(Notice::DeprecatedCronPolicy);
    }
}

pub fn warn_on_deprecated_daemon_flag(config: &JobConfiguration, sink: &mut dyn DiagnosticSink) {
    if config.daemon.is_some() {
        sink.notice(Notice::DeprecatedDaemonFlag);
    }
}

pub fn warn_on_deprecated_health_check_interval(
    config: &JobConfiguration,
    sink: &mut dyn DiagnosticSink,
) {
    if config.health_check_interval_secs.is_some() {
        sink.notice(Notice::DeprecatedHealthCheckInterval);
    }
}

/// An explicitly-empty cron schedule is almost always a templating accident;
/// older scheduler releases read it as a real cron job.
pub fn warn_on_empty_cron_schedule(config: &JobConfiguration, sink: &mut dyn DiagnosticSink) {
    if config.cron_schedule.as_deref().is_some_and(str::is_empty) {
        sink.notice(Notice::EmptyCronSchedule);
    }
}
