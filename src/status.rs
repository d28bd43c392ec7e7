//! Live status of the proxy group as reported by the container runtime.
//!
//! Nothing is cached between invocations: every call asks `docker ps` again.
use tracing::{debug, warn};

use crate::config::AuraConfig;
use crate::constants::PS_TABLE_FORMAT;
use crate::process::{CommandExecutor, CommandSpec, ProcessRunner};

/// Result of a status query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyStatus {
    /// At least one container matching the proxy prefix is up.
    pub running: bool,
    /// Verbatim table printed by the runtime, for humans.
    pub summary: String,
}

impl ProxyStatus {
    fn down() -> Self {
        Self::default()
    }
}

/// Queries the container runtime for the proxy group.
pub struct StatusReporter<'a, E> {
    config: &'a AuraConfig,
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: CommandExecutor> StatusReporter<'a, E> {
    /// Creates a reporter that queries the runtime named in `config`.
    pub fn new(config: &'a AuraConfig, runner: &'a ProcessRunner<E>) -> Self {
        Self { config, runner }
    }

    /// Never fails: an absent or broken runtime reads as "not running".
    pub fn status(&self) -> ProxyStatus {
        let command = CommandSpec::new(&self.config.docker).args([
            "ps".to_string(),
            "--filter".to_string(),
            format!("name={}", self.config.container_prefix),
            "--format".to_string(),
            PS_TABLE_FORMAT.to_string(),
        ]);

        let output = match self.runner.capture("query proxy status", &command) {
            Ok(output) => output,
            Err(err) => {
                debug!("Assuming proxy is down: {err}");
                return ProxyStatus::down();
            }
        };

        if !output.success() {
            warn!(
                "`{command}` exited with {:?}: {}",
                output.code,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return ProxyStatus::down();
        }

        let summary = String::from_utf8_lossy(&output.stdout).into_owned();
        let running = !container_rows(&summary).is_empty();
        ProxyStatus { running, summary }
    }
}

/// Data rows of a `docker ps` table, skipping blank lines and the `NAMES` header.
///
/// The table layout belongs to the runtime; keep any knowledge of it here.
pub fn container_rows(table: &str) -> Vec<&str> {
    let mut lines = table.lines().filter(|line| !line.trim().is_empty()).peekable();
    if lines
        .peek()
        .is_some_and(|first| first.trim_start().starts_with("NAMES"))
    {
        lines.next();
    }
    lines.collect()
}
