//! Log streaming for the proxy container.
//!
//! Output goes straight to the terminal; aura never buffers or stores it.
use crate::config::AuraConfig;
use crate::error::ToolError;
use crate::process::{CommandExecutor, CommandSpec, ProcessRunner};

/// Streams the proxy container's output through `docker logs`.
///
/// # Arguments
/// * `follow` - Keep streaming new output until interrupted.
///
/// # Returns
/// * The child's exit code (1 if it was killed by a signal), or an error if
///   the runtime could not be started.
pub fn stream_logs<E: CommandExecutor>(
    config: &AuraConfig,
    runner: &ProcessRunner<E>,
    follow: bool,
) -> Result<i32, ToolError> {
    let mut command = CommandSpec::new(&config.docker).arg("logs");
    if follow {
        command = command.arg("-f");
    }
    command = command.arg(&config.proxy_container);

    Ok(runner.status("stream logs", &command)?.unwrap_or(1))
}
