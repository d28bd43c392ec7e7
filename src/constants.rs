//! Constants shared across the aura lifecycle commands.
//!
//! On-disk artifact names, container naming conventions and the reserved suffix.

// ============================================================================
// Domain Naming
// ============================================================================

/// Reserved top-level domain suffix appended to bare service names.
pub const RESERVED_SUFFIX: &str = ".aura";

// ============================================================================
// File System Layout
// ============================================================================

/// Directory name created under `$HOME` for all installation state.
pub const STATE_DIR_NAME: &str = ".aura";

/// Environment variable that overrides the state directory location.
pub const STATE_DIR_ENV: &str = "AURA_HOME";

/// Relative path (under the state directory) holding per-domain certificates.
pub const CERT_DOMAINS_DIR: &str = "certs/domains";

/// User configuration file, relative to `$HOME`.
pub const USER_CONFIG_FILE: &str = ".config/aura/config.yaml";

/// Permission bits applied to every materialized artifact.
pub const ARTIFACT_MODE: u32 = 0o755;

/// Script run once after materialization.
pub const SETUP_SCRIPT: &str = "setup.sh";

/// Script that issues a certificate for a single domain argument.
pub const CERT_SCRIPT: &str = "add-cert.sh";

// ============================================================================
// External Tools
// ============================================================================

/// Container runtime CLI used for compose, ps and logs.
pub const DEFAULT_DOCKER: &str = "docker";

/// Shell interpreter used for the bundled scripts.
pub const DEFAULT_SHELL: &str = "bash";

/// Name prefix shared by every container in the proxy group.
pub const DEFAULT_CONTAINER_PREFIX: &str = "aura-";

/// Container whose output `aura logs` streams.
pub const DEFAULT_PROXY_CONTAINER: &str = "aura-caddy";

/// Go template handed to `docker ps --format`.
pub const PS_TABLE_FORMAT: &str = "table {{.Names}}\t{{.Status}}";

// ============================================================================
// User Hints
// ============================================================================

/// Endpoint served by the bundled demo container.
pub const DEMO_URL: &str = "https://whoami.aura";
