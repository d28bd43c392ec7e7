//! Bring-up and tear-down of the proxy container group.
use tracing::info;

use crate::config::AuraConfig;
use crate::error::{AuraError, ToolError};
use crate::process::{CommandExecutor, CommandSpec, ProcessRunner};

/// Drives `docker compose` from inside the state directory.
///
/// `up -d` and `down` already reconcile to the target state, so repeated
/// starts or stops succeed like the first one.
pub struct ProxyController<'a, E> {
    config: &'a AuraConfig,
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: CommandExecutor> ProxyController<'a, E> {
    /// Creates a controller for the compose project in `config.state_dir`.
    pub fn new(config: &'a AuraConfig, runner: &'a ProcessRunner<E>) -> Self {
        Self { config, runner }
    }

    /// `docker compose up -d`.
    pub fn start(&self) -> Result<(), AuraError> {
        self.ensure_installed()?;
        info!("Starting proxy group from {}", self.config.state_dir.display());
        self.runner.run("start proxy", &self.compose(&["up", "-d"]))?;
        Ok(())
    }

    /// `docker compose down`.
    pub fn stop(&self) -> Result<(), AuraError> {
        self.ensure_installed()?;
        info!("Stopping proxy group");
        self.runner.run("stop proxy", &self.compose(&["down"]))?;
        Ok(())
    }

    /// `docker compose down -v`, used by uninstall; volumes are removed too.
    pub fn stop_and_remove_volumes(&self) -> Result<(), ToolError> {
        self.runner
            .run("stop proxy", &self.compose(&["down", "-v"]))
    }

    fn compose(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new(&self.config.docker)
            .arg("compose")
            .args(args.iter().copied())
            .current_dir(&self.config.state_dir)
    }

    fn ensure_installed(&self) -> Result<(), AuraError> {
        if self.config.is_installed() {
            Ok(())
        } else {
            Err(AuraError::NotInstalled {
                state_dir: self.config.state_dir.clone(),
            })
        }
    }
}
