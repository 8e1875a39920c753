//! Policy validators, run in a fixed order with fail-fast semantics.
//!
//! Each validator is a pure function of the configuration snapshot. The
//! first fatal violation aborts the remaining checks; advisory findings go
//! through the diagnostic sink and never abort.

use job_model::JobConfiguration;
use lazy_static::lazy_static;
use regex::Regex;

use crate::diagnostics::{DiagnosticSink, Notice};
use crate::error::{PreflightError, Result};

lazy_static! {
    static ref STAGING_RE: Regex = Regex::new(r"^staging\d*$").unwrap();
}

const FIXED_ENVIRONMENTS: [&str; 3] = ["prod", "devel", "test"];

/// Fraction of a dedicated job that must be allowed to fail during an update.
const DEDICATED_FAILURE_FRACTION: f64 = 0.02;

/// Runs every policy validator in its fixed order, stopping at the first
/// failure.
pub fn run_all(config: &JobConfiguration, sink: &mut dyn DiagnosticSink) -> Result<()> {
    check_health_check_exclusivity(config)?;
    check_update_policy(config)?;
    check_announce(config, sink)?;
    check_environment_name(config)?;
    Ok(())
}

/// The legacy `health_check_interval_secs` field and a `health_check` policy
/// cannot coexist; the two mechanisms are not reconcilable.
pub fn check_health_check_exclusivity(config: &JobConfiguration) -> Result<()> {
    if config.health_check_interval_secs.is_some() && config.health_check.is_some() {
        return Err(PreflightError::HealthCheckConflict);
    }
    Ok(())
}

/// Sizing checks on the update policy, plus watch-period sufficiency against
/// the effective health-check policy.
pub fn check_update_policy(config: &JobConfiguration) -> Result<()> {
    let instances = config.instances;
    let update = &config.update_policy;
    let health = config.effective_health_check();

    if update.max_total_failures >= instances {
        return Err(PreflightError::MaxFailuresTooLarge {
            instances,
            max_total_failures: update.max_total_failures,
        });
    }

    if config.is_dedicated() {
        let floor = dedicated_failure_floor(instances);
        if update.max_total_failures < floor {
            return Err(PreflightError::MaxFailuresBelowDedicatedFloor {
                instances,
                max_total_failures: update.max_total_failures,
                floor,
            });
        }
    }

    let target =
        health.initial_interval_secs + health.max_consecutive_failures * health.interval_secs;
    if update.watch_secs <= target {
        return Err(PreflightError::WatchPeriodTooShort {
            watch_secs: update.watch_secs,
            target,
            initial_interval_secs: health.initial_interval_secs,
            max_consecutive_failures: health.max_consecutive_failures,
            interval_secs: health.interval_secs,
        });
    }

    Ok(())
}

/// Minimum `max_total_failures` a dedicated job of the given size must
/// tolerate.
pub fn dedicated_failure_floor(instances: u32) -> u32 {
    (f64::from(instances) * DEDICATED_FAILURE_FRACTION).floor() as u32
}

/// Announce sanity: an unbound primary port is advisory; a static port
/// number anywhere in the port map is fatal unless the job is dedicated.
/// The scan deliberately covers the whole map, not just the primary port:
/// any static binding can collide on shared hosts.
pub fn check_announce(config: &JobConfiguration, sink: &mut dyn DiagnosticSink) -> Result<()> {
    let announce = match &config.announce {
        Some(announce) => announce,
        None => return Ok(()),
    };

    if !config.ports.contains(&announce.primary_port) {
        sink.notice(Notice::PrimaryPortUnbound {
            primary_port: announce.primary_port.clone(),
        });
    }

    if !config.is_dedicated() {
        for (name, value) in &announce.port_map {
            if is_static_port(value) {
                return Err(PreflightError::StaticPortRequiresDedicated {
                    port_name: name.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}

fn is_static_port(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Environment names follow a closed grammar: the fixed tags plus
/// `staging<number>`.
pub fn check_environment_name(config: &JobConfiguration) -> Result<()> {
    let name = match config.environment.as_deref() {
        // Injection is populate's job; an absent tag is not a grammar error.
        None => return Ok(()),
        Some(name) => name,
    };

    if FIXED_ENVIRONMENTS.contains(&name) || STAGING_RE.is_match(name) {
        return Ok(());
    }

    Err(PreflightError::InvalidEnvironmentName { name: name.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use job_model::{AnnouncePolicy, HealthCheckPolicy, JobConfiguration, UpdatePolicy};
    use std::collections::BTreeMap;

    fn base_config(instances: u32, max_total_failures: u32, watch_secs: u32) -> JobConfiguration {
        JobConfiguration::new(
            "svc",
            instances,
            UpdatePolicy { max_total_failures, watch_secs },
        )
    }

    #[test]
    fn test_exclusivity_rejects_both_mechanisms() {
        let mut config = base_config(2, 1, 45);
        config.health_check_interval_secs = Some(30);
        config.health_check = Some(HealthCheckPolicy::default());

        assert!(matches!(
            check_health_check_exclusivity(&config),
            Err(PreflightError::HealthCheckConflict)
        ));
    }

    #[test]
    fn test_exclusivity_allows_either_alone() {
        let mut config = base_config(2, 1, 45);
        config.health_check_interval_secs = Some(30);
        assert!(check_health_check_exclusivity(&config).is_ok());

        let mut config = base_config(2, 1, 45);
        config.health_check = Some(HealthCheckPolicy::default());
        assert!(check_health_check_exclusivity(&config).is_ok());
    }

    #[test]
    fn test_max_failures_must_be_below_job_size() {
        let config = base_config(10, 10, 45);

        match check_update_policy(&config) {
            Err(PreflightError::MaxFailuresTooLarge { instances, max_total_failures }) => {
                assert_eq!(instances, 10);
                assert_eq!(max_total_failures, 10);
            }
            other => panic!("expected MaxFailuresTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_max_failures_error_cites_safe_upper_bound() {
        let err = check_update_policy(&base_config(10, 12, 45)).unwrap_err();
        assert!(err.to_string().contains("max_total_failures <= 9"));
    }

    #[test]
    fn test_dedicated_floor_enforced() {
        let mut config = base_config(200, 3, 45);
        config.constraints.insert("dedicated".to_string());

        match check_update_policy(&config) {
            Err(PreflightError::MaxFailuresBelowDedicatedFloor { floor, .. }) => {
                assert_eq!(floor, 4);
            }
            other => panic!("expected MaxFailuresBelowDedicatedFloor, got {other:?}"),
        }
    }

    #[test]
    fn test_dedicated_floor_not_applied_to_shared_jobs() {
        // Same sizing, no dedicated constraint: only the upper bound applies.
        let config = base_config(200, 3, 45);
        assert!(check_update_policy(&config).is_ok());
    }

    #[test]
    fn test_dedicated_failure_floor_values() {
        assert_eq!(dedicated_failure_floor(49), 0);
        assert_eq!(dedicated_failure_floor(50), 1);
        assert_eq!(dedicated_failure_floor(99), 1);
        assert_eq!(dedicated_failure_floor(100), 2);
        assert_eq!(dedicated_failure_floor(200), 4);
    }

    #[test]
    fn test_watch_period_must_exceed_target() {
        let mut config = base_config(10, 1, 35);
        config.health_check = Some(HealthCheckPolicy {
            initial_interval_secs: 15,
            max_consecutive_failures: 2,
            interval_secs: 10,
        });

        match check_update_policy(&config) {
            Err(PreflightError::WatchPeriodTooShort {
                watch_secs,
                target,
                initial_interval_secs,
                max_consecutive_failures,
                interval_secs,
            }) => {
                assert_eq!(watch_secs, 35);
                assert_eq!(target, 35);
                assert_eq!(initial_interval_secs, 15);
                assert_eq!(max_consecutive_failures, 2);
                assert_eq!(interval_secs, 10);
            }
            other => panic!("expected WatchPeriodTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_watch_period_message_embeds_all_quantities() {
        let mut config = base_config(10, 1, 30);
        config.health_check = Some(HealthCheckPolicy {
            initial_interval_secs: 15,
            max_consecutive_failures: 2,
            interval_secs: 10,
        });

        let message = check_update_policy(&config).unwrap_err().to_string();
        for quantity in ["30", "35", "15", "2", "10"] {
            assert!(message.contains(quantity), "missing {quantity} in: {message}");
        }
    }

    #[test]
    fn test_watch_period_uses_scheduler_defaults_without_block() {
        // Default policy target is 15 + 0 * 10 = 15.
        assert!(check_update_policy(&base_config(10, 1, 15)).is_err());
        assert!(check_update_policy(&base_config(10, 1, 16)).is_ok());
    }

    fn announce(primary: &str, port_map: &[(&str, &str)]) -> AnnouncePolicy {
        AnnouncePolicy {
            primary_port: primary.to_string(),
            port_map: port_map
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_absent_announce_is_a_no_op() {
        let config = base_config(2, 1, 45);
        let mut sink = MemorySink::new();
        assert!(check_announce(&config, &mut sink).is_ok());
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn test_unbound_primary_port_is_advisory() {
        let mut config = base_config(2, 1, 45);
        config.announce = Some(announce("http", &[]));
        let mut sink = MemorySink::new();

        assert!(check_announce(&config, &mut sink).is_ok());
        assert_eq!(
            sink.notices(),
            [Notice::PrimaryPortUnbound { primary_port: "http".to_string() }]
        );
    }

    #[test]
    fn test_bound_primary_port_is_silent() {
        let mut config = base_config(2, 1, 45);
        config.ports.insert("http".to_string());
        config.announce = Some(announce("http", &[]));
        let mut sink = MemorySink::new();

        assert!(check_announce(&config, &mut sink).is_ok());
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn test_static_port_requires_dedicated() {
        let mut config = base_config(2, 1, 45);
        config.ports.insert("http".to_string());
        config.announce = Some(announce("http", &[("http", "8080")]));
        let mut sink = MemorySink::new();

        match check_announce(&config, &mut sink) {
            Err(PreflightError::StaticPortRequiresDedicated { port_name, value }) => {
                assert_eq!(port_name, "http");
                assert_eq!(value, "8080");
            }
            other => panic!("expected StaticPortRequiresDedicated, got {other:?}"),
        }
    }

    #[test]
    fn test_templated_port_values_are_skipped() {
        let mut config = base_config(2, 1, 45);
        config.ports.insert("http".to_string());
        config.announce = Some(announce("http", &[("http", "{{ports[http]}}")]));
        let mut sink = MemorySink::new();

        assert!(check_announce(&config, &mut sink).is_ok());
    }

    #[test]
    fn test_dedicated_job_may_pin_static_ports() {
        let mut config = base_config(2, 1, 45);
        config.ports.insert("http".to_string());
        config.constraints.insert("dedicated".to_string());
        config.announce = Some(announce("http", &[("http", "8080")]));
        let mut sink = MemorySink::new();

        assert!(check_announce(&config, &mut sink).is_ok());
    }

    #[test]
    fn test_static_port_scan_covers_the_whole_map() {
        // The static value sits on a secondary alias, not the primary port.
        let mut config = base_config(2, 1, 45);
        config.ports.insert("http".to_string());
        config.announce = Some(announce(
            "http",
            &[("http", "{{ports[http]}}"), ("metrics", "9090")],
        ));
        let mut sink = MemorySink::new();

        assert!(matches!(
            check_announce(&config, &mut sink),
            Err(PreflightError::StaticPortRequiresDedicated { .. })
        ));
    }

    #[test]
    fn test_environment_grammar_accepts_known_names() {
        for name in ["prod", "devel", "test", "staging", "staging42"] {
            let mut config = base_config(2, 1, 45);
            config.environment = Some(name.to_string());
            assert!(check_environment_name(&config).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn test_environment_grammar_rejects_everything_else() {
        for name in ["production", "stagingX", "", "Staging1", "devel2"] {
            let mut config = base_config(2, 1, 45);
            config.environment = Some(name.to_string());
            assert!(
                matches!(
                    check_environment_name(&config),
                    Err(PreflightError::InvalidEnvironmentName { .. })
                ),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_absent_environment_is_not_a_grammar_error() {
        let config = base_config(2, 1, 45);
        assert!(check_environment_name(&config).is_ok());
    }

    #[test]
    fn test_static_port_detection() {
        assert!(is_static_port("8080"));
        assert!(is_static_port("0"));
        assert!(!is_static_port(""));
        assert!(!is_static_port("+8080"));
        assert!(!is_static_port(" 8080"));
        assert!(!is_static_port("{{ports[http]}}"));
    }
}
