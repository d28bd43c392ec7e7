//! Configuration management for aura.
//!
//! [`AuraConfig`] is built once in `main` and handed to every component.
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::constants::{
    CERT_DOMAINS_DIR, DEFAULT_CONTAINER_PREFIX, DEFAULT_DOCKER, DEFAULT_PROXY_CONTAINER,
    DEFAULT_SHELL, STATE_DIR_ENV, STATE_DIR_NAME, USER_CONFIG_FILE,
};
use crate::error::ConfigError;

/// Resolved settings shared by every lifecycle command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuraConfig {
    /// Root of all installation state (`~/.aura` by default).
    pub state_dir: PathBuf,
    /// Container runtime CLI.
    pub docker: String,
    /// Shell used to run the bundled scripts.
    pub shell: String,
    /// Name prefix identifying the proxy group's containers.
    pub container_prefix: String,
    /// Container streamed by `aura logs`.
    pub proxy_container: String,
}

/// Optional overrides read from `~/.config/aura/config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    state_dir: Option<String>,
    docker: Option<String>,
    shell: Option<String>,
    container_prefix: Option<String>,
    proxy_container: Option<String>,
}

impl AuraConfig {
    /// Defaults rooted at the given home directory.
    pub fn from_home(home: &Path) -> Self {
        Self {
            state_dir: home.join(STATE_DIR_NAME),
            docker: DEFAULT_DOCKER.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            container_prefix: DEFAULT_CONTAINER_PREFIX.to_string(),
            proxy_container: DEFAULT_PROXY_CONTAINER.to_string(),
        }
    }

    /// Resolves configuration from `HOME`, the optional user config file and `AURA_HOME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingHome)?;

        let mut config = Self::from_home(&home);
        config.apply_file(&home.join(USER_CONFIG_FILE))?;

        if let Some(dir) = env::var_os(STATE_DIR_ENV).filter(|value| !value.is_empty()) {
            config.state_dir = PathBuf::from(dir);
        }

        debug!("Resolved aura config: {config:?}");
        Ok(config)
    }

    /// Applies overrides from a YAML file; a missing file is not an error.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let file: Option<ConfigFile> =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let Some(file) = file else {
            return Ok(());
        };

        if let Some(dir) = expand_value(file.state_dir)? {
            self.state_dir = PathBuf::from(dir);
        }
        if let Some(docker) = expand_value(file.docker)? {
            self.docker = docker;
        }
        if let Some(shell) = expand_value(file.shell)? {
            self.shell = shell;
        }
        if let Some(prefix) = expand_value(file.container_prefix)? {
            self.container_prefix = prefix;
        }
        if let Some(container) = expand_value(file.proxy_container)? {
            self.proxy_container = container;
        }

        debug!("Applied config overrides from {}", path.display());
        Ok(())
    }

    /// Replaces the state directory, e.g. from `--state-dir`.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Absolute path of an artifact or script inside the state directory.
    pub fn state_path(&self, name: &str) -> PathBuf {
        self.state_dir.join(name)
    }

    /// Directory holding per-domain certificate artifacts.
    pub fn cert_domains_dir(&self) -> PathBuf {
        self.state_dir.join(CERT_DOMAINS_DIR)
    }

    /// Whether the state directory exists, i.e. aura has been installed.
    pub fn is_installed(&self) -> bool {
        self.state_dir.is_dir()
    }
}

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("env var pattern is valid")
});

fn expand_value(value: Option<String>) -> Result<Option<String>, ConfigError> {
    value.as_deref().map(expand_env_vars).transpose()
}

/// Expands `$VAR` and `${VAR}` references using the process environment.
///
/// Only parsed string values pass through here, so YAML comments are never
/// expanded. An unclosed `${VAR` is left as literal text.
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut missing = None;
    let result = ENV_VAR_PATTERN.replace_all(input, |caps: &regex::Captures| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |name| name.as_str());
        match env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::MissingEnvVar(var)),
        None => Ok(result.into_owned()),
    }
}
