use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hook::JobHook;

/// Environment tag injected when a job does not declare one.
pub const DEFAULT_ENVIRONMENT: &str = "devel";

/// Constraint literal that pins a job to machines reserved for it.
pub const DEDICATED_CONSTRAINT: &str = "dedicated";

/// Rolling-update policy declared by a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePolicy {
    /// Total instance failures tolerated before the update is aborted.
    pub max_total_failures: u32,
    /// Seconds an updated instance is watched before being declared healthy.
    pub watch_secs: u32,
}

fn default_initial_interval_secs() -> u32 {
    15
}

fn default_interval_secs() -> u32 {
    10
}

/// Health-check policy for a job's instances.
///
/// Fields omitted from the source document fall back to the scheduler
/// defaults, matching what the executor applies at launch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckPolicy {
    #[serde(default = "default_initial_interval_secs")]
    pub initial_interval_secs: u32,
    #[serde(default)]
    pub max_consecutive_failures: u32,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
}

impl Default for HealthCheckPolicy {
    fn default() -> Self {
        Self {
            initial_interval_secs: default_initial_interval_secs(),
            max_consecutive_failures: 0,
            interval_secs: default_interval_secs(),
        }
    }
}

/// Service-announcement policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncePolicy {
    /// Named port advertised as the primary endpoint.
    pub primary_port: String,
    /// Extra port aliases; values are either templated references resolved at
    /// task launch or literal port numbers (dedicated jobs only).
    #[serde(default)]
    pub port_map: BTreeMap<String, String>,
}

/// A parsed job-configuration document.
///
/// Produced by the configuration loader and handed to the pre-flight gate by
/// mutable borrow; the loader keeps ownership for the lifetime of the
/// submission.
#[derive(Clone, Serialize, Deserialize)]
pub struct JobConfiguration {
    /// Job name, carried for diagnostics.
    pub name: String,
    /// Declared job size.
    pub instances: u32,
    /// Named ports bound by the job's processes.
    #[serde(default)]
    pub ports: BTreeSet<String>,
    /// Deployment environment tag; populated with [`DEFAULT_ENVIRONMENT`]
    /// when absent.
    #[serde(default)]
    pub environment: Option<String>,
    pub update_policy: UpdatePolicy,
    #[serde(default)]
    pub health_check: Option<HealthCheckPolicy>,
    /// Deprecated in favor of `cron_collision_policy`; still honored.
    #[serde(default)]
    pub cron_policy: Option<String>,
    #[serde(default)]
    pub cron_schedule: Option<String>,
    /// Deprecated in favor of the `service` flag; still honored.
    #[serde(default)]
    pub daemon: Option<bool>,
    /// Deprecated in favor of `health_check`; still honored.
    #[serde(default)]
    pub health_check_interval_secs: Option<u32>,
    #[serde(default)]
    pub announce: Option<AnnouncePolicy>,
    /// Scheduling constraints; may contain [`DEDICATED_CONSTRAINT`].
    #[serde(default)]
    pub constraints: BTreeSet<String>,
    /// Hooks attached during populate and consumed by the submission layer.
    #[serde(skip)]
    pub hooks: Vec<JobHook>,
}

impl JobConfiguration {
    /// Creates a document with the required fields set and everything else
    /// empty, the shape a minimal source document parses into.
    pub fn new(name: impl Into<String>, instances: u32, update_policy: UpdatePolicy) -> Self {
        Self {
            name: name.into(),
            instances,
            ports: BTreeSet::new(),
            environment: None,
            update_policy,
            health_check: None,
            cron_policy: None,
            cron_schedule: None,
            daemon: None,
            health_check_interval_secs: None,
            announce: None,
            constraints: BTreeSet::new(),
            hooks: Vec::new(),
        }
    }

    /// Whether the job is pinned to dedicated machines.
    pub fn is_dedicated(&self) -> bool {
        self.constraints.contains(DEDICATED_CONSTRAINT)
    }

    /// The health-check policy in effect: the declared block, or the
    /// scheduler defaults when the document omits one.
    pub fn effective_health_check(&self) -> HealthCheckPolicy {
        self.health_check.clone().unwrap_or_default()
    }
}

impl fmt::Debug for JobConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobConfiguration")
            .field("name", &self.name)
            .field("instances", &self.instances)
            .field("ports", &self.ports)
            .field("environment", &self.environment)
            .field("update_policy", &self.update_policy)
            .field("health_check", &self.health_check)
            .field("cron_policy", &self.cron_policy)
            .field("cron_schedule", &self.cron_schedule)
            .field("daemon", &self.daemon)
            .field("health_check_interval_secs", &self.health_check_interval_secs)
            .field("announce", &self.announce)
            .field("constraints", &self.constraints)
            .field("hooks", &format_args!("<{} attached>", self.hooks.len()))
            .finish()
    }
}
