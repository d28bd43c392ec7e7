//! Command-line interface for aura.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use strum_macros::IntoStaticStr;

/// Verbosity accepted by `--log-level`, by name or as a digit from 0 (off) to 5 (trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// Disable logging.
    #[value(alias = "0")]
    Off,
    /// Errors only.
    #[value(aliases = ["1", "err"])]
    Error,
    /// Warnings and errors (default).
    #[value(aliases = ["2", "warning"])]
    Warn,
    /// Lifecycle progress.
    #[value(alias = "3")]
    Info,
    /// Every command aura runs.
    #[value(alias = "4")]
    Debug,
    /// Everything.
    #[value(alias = "5")]
    Trace,
}

impl LogLevel {
    /// Filter directive for `EnvFilter`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

const LONG_ABOUT: &str = r"
    ___   _   _ ____    ___
   / _ \ | | | |  _ \  / _ \
  | |_| || | | | |_) || |_| |
  |  _  || |_| |  _ < |  _  |
  |_| |_| \___/|_| \_\|_| |_|

     Local HTTPS development proxy

Aura provides a Docker-based reverse proxy with automatic HTTPS for local
development using the .aura TLD.";

/// Command-line interface for aura.
#[derive(Parser)]
#[command(name = "aura", version)]
#[command(about = "Aura - Local HTTPS development proxy", long_about = LONG_ABOUT)]
pub struct Cli {
    /// Override the logging verbosity for this invocation only.
    #[arg(long, value_name = "LEVEL", global = true, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Use this directory instead of ~/.aura for installation state.
    #[arg(long, value_name = "PATH", global = true)]
    pub state_dir: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for aura.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Install Aura proxy system.
    ///
    /// Sets up the loopback address, mkcert, and the Docker configuration.
    Install,

    /// Start Aura proxy.
    Start,

    /// Stop Aura proxy.
    Stop,

    /// Generate certificate for a domain.
    Cert {
        /// Service name; `.aura` is appended when missing.
        domain: String,
    },

    /// Show Aura proxy status.
    Status,

    /// Show Aura proxy logs.
    Logs {
        /// Follow log output.
        #[arg(short, long)]
        follow: bool,
    },

    /// Uninstall Aura proxy system.
    Uninstall,
}

/// Parses command-line arguments and returns a `Cli` struct.
pub fn parse_args() -> Cli {
    Cli::parse()
}
