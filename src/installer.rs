//! Installation lifecycle: `Absent -> Installed -> (Running <-> Stopped) -> Absent`.
//!
//! The state directory is the only record of whether aura is installed.
//! Running versus stopped is never stored; [`crate::status`] asks the runtime.
use std::{
    fs,
    io::{BufRead, ErrorKind, Write},
};

use tracing::{info, warn};

use crate::config::AuraConfig;
use crate::constants::SETUP_SCRIPT;
use crate::error::AuraError;
use crate::process::{CommandExecutor, CommandSpec, ProcessRunner};
use crate::proxy::ProxyController;
use crate::templates::{Artifact, ConfigMaterializer, MaterializeReport};

/// What the state directory currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    /// No state directory.
    Absent,
    /// The directory exists but an earlier install did not finish.
    Partial {
        /// Artifacts that are not on disk.
        missing: Vec<Artifact>,
        /// Whether `certs/domains` is missing.
        missing_cert_dir: bool,
    },
    /// Every artifact and the certificate directory are present.
    Installed,
}

/// Outcome of `aura uninstall`. Declining the prompt is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// There was nothing to remove.
    NotInstalled,
    /// The user declined the confirmation.
    Cancelled,
    /// The state directory was removed.
    Removed {
        /// `docker compose down -v` failed before the removal.
        stop_failed: bool,
    },
}

/// Sequences install and uninstall over the other components.
pub struct Installer<'a, E> {
    config: &'a AuraConfig,
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: CommandExecutor> Installer<'a, E> {
    /// Creates an installer for `config`'s state directory.
    pub fn new(config: &'a AuraConfig, runner: &'a ProcessRunner<E>) -> Self {
        Self { config, runner }
    }

    /// Classifies the state directory.
    pub fn state(&self) -> InstallState {
        if !self.config.is_installed() {
            return InstallState::Absent;
        }

        let missing = ConfigMaterializer::new(self.config).missing();
        let missing_cert_dir = !self.config.cert_domains_dir().is_dir();
        if missing.is_empty() && !missing_cert_dir {
            InstallState::Installed
        } else {
            InstallState::Partial {
                missing,
                missing_cert_dir,
            }
        }
    }

    /// Creates the state directory, materializes every artifact and runs `setup.sh`.
    ///
    /// Any failing step stops the sequence. Running install again is the
    /// recovery path, since materialization overwrites whatever is there.
    pub fn install(&self) -> Result<MaterializeReport, AuraError> {
        let state_dir = &self.config.state_dir;
        fs::create_dir_all(state_dir).map_err(|source| AuraError::CreateStateDir {
            path: state_dir.clone(),
            source,
        })?;

        let report = ConfigMaterializer::new(self.config).materialize()?;
        info!(
            "Materialized {} artifacts into {}",
            report.written.len(),
            state_dir.display()
        );

        let setup = CommandSpec::new(&self.config.shell)
            .arg(self.config.state_path(SETUP_SCRIPT).to_string_lossy())
            .current_dir(state_dir);
        self.runner.run("run setup script", &setup)?;

        Ok(report)
    }

    /// Asks for confirmation on `prompt`/`answer`, then tears everything down.
    ///
    /// The compose stop is best effort; the directory is removed regardless.
    pub fn uninstall<R: BufRead, W: Write>(
        &self,
        mut answer: R,
        mut prompt: W,
    ) -> Result<UninstallOutcome, AuraError> {
        if !self.config.is_installed() {
            return Ok(UninstallOutcome::NotInstalled);
        }

        write!(
            prompt,
            "⚠️  This will remove Aura proxy and all certificates.\nAre you sure? (y/N): "
        )
        .and_then(|()| prompt.flush())
        .map_err(AuraError::Prompt)?;

        let mut response = String::new();
        answer.read_line(&mut response).map_err(AuraError::Prompt)?;
        if !matches!(response.trim(), "y" | "Y") {
            return Ok(UninstallOutcome::Cancelled);
        }

        let stop_failed =
            match ProxyController::new(self.config, self.runner).stop_and_remove_volumes() {
                Ok(()) => false,
                Err(err) => {
                    warn!("Continuing uninstall after stop failure: {err}");
                    true
                }
            };

        let state_dir = &self.config.state_dir;
        match fs::remove_dir_all(state_dir) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(AuraError::RemoveStateDir {
                    path: state_dir.clone(),
                    source,
                });
            }
        }
        info!("Removed {}", state_dir.display());

        Ok(UninstallOutcome::Removed { stop_failed })
    }
}
