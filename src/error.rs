//! Error handling for aura.
use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level failure of an aura command.
#[derive(Debug, Error)]
pub enum AuraError {
    /// The state directory could not be created.
    #[error("failed to create aura directory {}: {source}", path.display())]
    CreateStateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: io::Error,
    },

    /// A bundled artifact could not be written into the state directory.
    #[error("failed to copy configs: could not write {artifact} to {}: {source}", path.display())]
    Materialize {
        /// File name of the artifact that failed.
        artifact: &'static str,
        /// Destination path.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: io::Error,
    },

    /// The state directory could not be removed during uninstall.
    #[error("failed to remove aura directory {}: {source}", path.display())]
    RemoveStateDir {
        /// Directory that was being removed.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: io::Error,
    },

    /// Reading the confirmation answer failed.
    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] io::Error),

    /// A lifecycle command ran before `aura install`.
    #[error("aura is not installed ({} does not exist); run `aura install` first", state_dir.display())]
    NotInstalled {
        /// Expected state directory.
        state_dir: PathBuf,
    },

    /// An external tool failed to start or reported failure.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure of a subprocess invoked on behalf of a command.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be spawned at all.
    #[error("failed to {action}: could not run `{command}`: {source}")]
    Spawn {
        /// What aura was trying to do.
        action: String,
        /// Rendered command line.
        command: String,
        /// The underlying error that occurred.
        #[source]
        source: io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("failed to {action}: `{command}` {}", describe_exit(*code))]
    Failed {
        /// What aura was trying to do.
        action: String,
        /// Rendered command line.
        command: String,
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
    },
}

impl ToolError {
    /// Exit code reported by the child, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::Spawn { .. } => None,
            ToolError::Failed { code, .. } => *code,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Errors raised while resolving [`crate::config::AuraConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `HOME` is unset, so the state directory cannot be located.
    #[error("HOME environment variable not set")]
    MissingHome,

    /// The user configuration file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: io::Error,
    },

    /// The user configuration file is not valid YAML for the expected shape.
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: serde_yaml::Error,
    },

    /// A `${VAR}` reference in the configuration file is undefined.
    #[error("config references undefined environment variable `{0}`")]
    MissingEnvVar(String),
}
