use thiserror::Error;

/// Fatal policy violations raised by the validate sequence.
///
/// Each variant carries the offending values and any computed bound as
/// structured fields; the human-readable, multi-line text is rendered through
/// `Display` at the process boundary.
#[derive(Error, Debug)]
pub enum PreflightError {
    #[error(
        "Both health_check_interval_secs and a health_check policy are present.\n\
         health_check_interval_secs is deprecated; specify the health_check policy only."
    )]
    HealthCheckConflict,

    #[error(
        "max_total_failures in the update policy must be less than the job size.\n\
         Based on your job size ({instances}) you should use max_total_failures <= {max_allowed}.",
        max_allowed = .instances.saturating_sub(1)
    )]
    MaxFailuresTooLarge { instances: u32, max_total_failures: u32 },

    #[error(
        "Since this is a dedicated job, max_total_failures in the update policy must be\n\
         no less than 2% of the job size.\n\
         Based on your job size ({instances}) you should use max_total_failures >= {floor}."
    )]
    MaxFailuresBelowDedicatedFloor {
        instances: u32,
        max_total_failures: u32,
        floor: u32,
    },

    #[error(
        "You have specified an insufficiently short watch period ({watch_secs} seconds)\n\
         in your update policy. Your update will always succeed. For the updater to\n\
         detect health-check failures, watch_secs must be greater than {target} seconds\n\
         to account for an initial health-check interval ({initial_interval_secs} seconds)\n\
         plus {max_consecutive_failures} consecutive failures at a check interval of\n\
         {interval_secs} seconds."
    )]
    WatchPeriodTooShort {
        watch_secs: u32,
        target: u32,
        initial_interval_secs: u32,
        max_consecutive_failures: u32,
        interval_secs: u32,
    },

    #[error("Job must be dedicated in order to specify static ports!")]
    StaticPortRequiresDedicated { port_name: String, value: String },

    #[error(
        "Environment name should be one of \"prod\", \"devel\", \"test\" or \
         staging<number>! Got {name}"
    )]
    InvalidEnvironmentName { name: String },

    #[error("Binding application failed: {0}")]
    Binding(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Result type alias for pre-flight operations
pub type Result<T> = std::result::Result<T, PreflightError>;
