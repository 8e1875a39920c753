use job_model::{JobConfiguration, DEFAULT_ENVIRONMENT};

use crate::diagnostics::{DiagnosticSink, Notice};

/// Populates [`DEFAULT_ENVIRONMENT`] when the document omits an environment
/// tag, announcing the injected value. A document that already carries a tag
/// passes through untouched, so repeated populate runs emit the notice at
/// most once.
pub fn inject_default_environment(config: &mut JobConfiguration, sink: &mut dyn DiagnosticSink) {
    if config.environment.is_none() {
        config.environment = Some(DEFAULT_ENVIRONMENT.to_string());
        sink.notice(Notice::DefaultEnvironmentInjected {
            default: DEFAULT_ENVIRONMENT.to_string(),
        });
    }
}
