//! Bundled configuration artifacts and their materialization into the state directory.
use std::{
    fs,
    io::ErrorKind,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};
use tracing::{debug, warn};

use crate::config::AuraConfig;
use crate::constants::ARTIFACT_MODE;
use crate::error::AuraError;

macro_rules! template {
    ($name:literal) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name))
    };
}

/// One file of the fixed artifact set copied into every installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Artifact {
    /// Compose definition for the proxy group.
    #[strum(serialize = "docker-compose.yml")]
    Compose,
    /// Example compose file for projects joining the proxy network.
    #[strum(serialize = "docker-compose.example.yml")]
    ComposeExample,
    /// Top-level setup script run by `aura install`.
    #[strum(serialize = "setup.sh")]
    Setup,
    /// Loopback alias configuration.
    #[strum(serialize = "setup-loopback.sh")]
    SetupLoopback,
    /// Local certificate authority bootstrap.
    #[strum(serialize = "setup-mkcert.sh")]
    SetupMkcert,
    /// Per-domain certificate issuance.
    #[strum(serialize = "add-cert.sh")]
    AddCert,
}

impl Artifact {
    /// File name inside the state directory.
    pub fn file_name(self) -> &'static str {
        self.into()
    }

    /// Bundled template bytes.
    pub fn contents(self) -> &'static [u8] {
        match self {
            Artifact::Compose => template!("docker-compose.yml"),
            Artifact::ComposeExample => template!("docker-compose.example.yml"),
            Artifact::Setup => template!("setup.sh"),
            Artifact::SetupLoopback => template!("setup-loopback.sh"),
            Artifact::SetupMkcert => template!("setup-mkcert.sh"),
            Artifact::AddCert => template!("add-cert.sh"),
        }
    }

    /// Every artifact, in materialization order.
    pub fn all() -> impl Iterator<Item = Artifact> {
        Artifact::iter()
    }
}

/// What a materialization pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Destination paths written, in order.
    pub written: Vec<PathBuf>,
    /// Artifacts whose previous on-disk content differed from the template.
    pub overwritten_edits: Vec<Artifact>,
}

/// Copies the bundled artifact set into the state directory.
///
/// Each copy unconditionally overwrites the destination; a failed run leaves
/// earlier files in place and is recovered by running it again.
pub struct ConfigMaterializer<'a> {
    config: &'a AuraConfig,
}

impl<'a> ConfigMaterializer<'a> {
    /// Creates a materializer writing into `config`'s state directory.
    pub fn new(config: &'a AuraConfig) -> Self {
        Self { config }
    }

    /// Creates the state and certificate directories, then writes every artifact executable.
    pub fn materialize(&self) -> Result<MaterializeReport, AuraError> {
        let domains_dir = self.config.cert_domains_dir();
        fs::create_dir_all(&domains_dir).map_err(|source| AuraError::CreateStateDir {
            path: domains_dir.clone(),
            source,
        })?;

        let mut report = MaterializeReport::default();
        for artifact in Artifact::all() {
            let path = self.config.state_path(artifact.file_name());
            if has_local_edits(&path, artifact) {
                warn!(
                    "Overwriting locally modified {} with the bundled version",
                    path.display()
                );
                report.overwritten_edits.push(artifact);
            }

            write_executable(&path, artifact.contents()).map_err(|source| {
                AuraError::Materialize {
                    artifact: artifact.file_name(),
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("Materialized {}", path.display());
            report.written.push(path);
        }

        Ok(report)
    }

    /// Artifacts absent from the state directory.
    pub fn missing(&self) -> Vec<Artifact> {
        Artifact::all()
            .filter(|artifact| !self.config.state_path(artifact.file_name()).is_file())
            .collect()
    }
}

fn write_executable(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)?;
    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))
}

fn has_local_edits(path: &Path, artifact: Artifact) -> bool {
    match fs::read(path) {
        Ok(existing) => digest(&existing) != digest(artifact.contents()),
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => {
            debug!("Could not read existing {}: {err}", path.display());
            false
        }
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}
