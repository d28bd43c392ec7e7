//! Aura manages a local HTTPS development proxy: it installs the proxy's
//! configuration under `~/.aura`, starts and stops the container group, issues
//! certificates for `.aura` domains and tears everything down again. TLS, DNS and
//! routing are left to Docker, Caddy and mkcert, which aura drives as subprocesses.

/// Certificate issuance and domain normalization.
pub mod cert;

/// CLI interface.
pub mod cli;

/// Configuration management.
pub mod config;

/// Shared names and defaults.
pub mod constants;

/// Error handling.
pub mod error;

/// Install/uninstall orchestration.
pub mod installer;

/// Proxy log streaming.
pub mod logs;

/// External command execution.
pub mod process;

/// Proxy group start/stop.
pub mod proxy;

/// Live proxy status.
pub mod status;

/// Bundled artifacts and materialization.
pub mod templates;

#[cfg(test)]
pub(crate) mod test_utils;
