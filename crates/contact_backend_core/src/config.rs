use std::path::PathBuf;
use std::time::Duration;

use crate::contract::{FunctionSpec, GraphApiSpec, RoleSpec, TableSpec};

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_APP_ID: &str = "dcwmv1pw85f0j";
pub const DEFAULT_ENV_NAME: &str = "prod";
pub const DEFAULT_OUTPUT_PATH: &str = "amplify_outputs.json";
pub const DEFAULT_HANDLER_SOURCE: &str = "assets/contact-handler/index.js";

/// Shortest pause between readiness checks; a zero interval is raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Bounds the wait for a dependent resource to become usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl ReadinessPolicy {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Pause actually taken between checks, never below [`MIN_POLL_INTERVAL`].
    pub fn effective_interval(&self) -> Duration {
        self.poll_interval.max(MIN_POLL_INTERVAL)
    }

    /// Number of checks the poll loop performs before giving up. Always at
    /// least one, so a zero timeout still gets a single look.
    pub fn max_attempts(&self) -> u32 {
        let attempts = self.timeout.as_millis() / self.effective_interval().as_millis();
        u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
    }

    /// The budget left once `attempts` checks have been spent, so phases
    /// waiting on the same resource share one timeout.
    pub fn after_attempts(&self, attempts: u32) -> Self {
        let spent = self.effective_interval().saturating_mul(attempts);
        Self {
            poll_interval: self.poll_interval,
            timeout: self.timeout.saturating_sub(spent),
        }
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Process-wide settings handed to every provisioner.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningConfig {
    pub region: String,
    pub app_id: String,
    pub env_name: String,
    pub table: TableSpec,
    pub role: RoleSpec,
    pub function: FunctionSpec,
    pub graph_api: GraphApiSpec,
    pub readiness: ReadinessPolicy,
    pub output_path: PathBuf,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            env_name: DEFAULT_ENV_NAME.to_string(),
            table: TableSpec::default(),
            role: RoleSpec::default(),
            function: FunctionSpec::default(),
            graph_api: GraphApiSpec::default(),
            readiness: ReadinessPolicy::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_attempts_divides_timeout_by_interval() {
        let policy = ReadinessPolicy::new(Duration::from_secs(2), Duration::from_secs(60));
        assert_eq!(policy.max_attempts(), 30);
    }

    #[test]
    fn max_attempts_never_drops_below_one() {
        let zero_timeout = ReadinessPolicy::new(Duration::from_secs(5), Duration::ZERO);
        assert_eq!(zero_timeout.max_attempts(), 1);
    }

    #[test]
    fn zero_interval_still_spreads_checks_over_the_timeout() {
        let zero_interval = ReadinessPolicy::new(Duration::ZERO, Duration::from_secs(60));

        assert_eq!(zero_interval.effective_interval(), MIN_POLL_INTERVAL);
        assert_eq!(zero_interval.max_attempts(), 600);
    }

    #[test]
    fn spent_attempts_shrink_the_remaining_budget() {
        let policy = ReadinessPolicy::new(Duration::from_secs(2), Duration::from_secs(60));

        assert_eq!(policy.after_attempts(10).max_attempts(), 20);
        assert_eq!(policy.after_attempts(30).timeout, Duration::ZERO);
        assert_eq!(policy.after_attempts(u32::MAX).max_attempts(), 1);
    }

    #[test]
    fn defaults_target_the_contact_backend() {
        let config = ProvisioningConfig::default();
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.env_name, "prod");
        assert_eq!(config.table.name, "Contact");
        assert_eq!(config.output_path, PathBuf::from("amplify_outputs.json"));
    }
}
