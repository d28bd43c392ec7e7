//! Per-domain certificate issuance.
use tracing::info;

use crate::config::AuraConfig;
use crate::constants::{CERT_SCRIPT, RESERVED_SUFFIX};
use crate::error::AuraError;
use crate::process::{CommandExecutor, CommandSpec, ProcessRunner};

/// Appends the reserved `.aura` suffix unless the name already ends with it.
///
/// Idempotent: `normalize_domain(normalize_domain(d)) == normalize_domain(d)`.
pub fn normalize_domain(input: &str) -> String {
    if input.ends_with(RESERVED_SUFFIX) {
        input.to_string()
    } else {
        format!("{input}{RESERVED_SUFFIX}")
    }
}

/// Invokes the bundled issuance script for one domain.
///
/// Holds no state between calls; re-issuing a domain is an ordinary success.
pub struct CertificateIssuer<'a, E> {
    config: &'a AuraConfig,
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: CommandExecutor> CertificateIssuer<'a, E> {
    /// Creates an issuer that runs `add-cert.sh` through `runner`.
    pub fn new(config: &'a AuraConfig, runner: &'a ProcessRunner<E>) -> Self {
        Self { config, runner }
    }

    /// Normalizes `domain` and runs `add-cert.sh <domain>`, returning the normalized name.
    pub fn issue(&self, domain: &str) -> Result<String, AuraError> {
        if !self.config.is_installed() {
            return Err(AuraError::NotInstalled {
                state_dir: self.config.state_dir.clone(),
            });
        }

        let domain = normalize_domain(domain);
        info!("Issuing certificate for {domain}");

        let command = CommandSpec::new(&self.config.shell)
            .arg(self.config.state_path(CERT_SCRIPT).to_string_lossy())
            .arg(&domain)
            .current_dir(&self.config.state_dir);
        self.runner.run("generate certificate", &command)?;

        Ok(domain)
    }
}
