//! External command execution.
//!
//! Every subprocess aura starts goes through [`ProcessRunner`], which wraps a
//! [`CommandExecutor`]. The real executor inherits the terminal's standard
//! streams; tests swap in a recorder instead of spawning docker or bash.
use std::{
    fmt, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::debug;

use crate::error::ToolError;

/// A program invocation: executable, ordered arguments, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Ordered arguments.
    pub args: Vec<String>,
    /// Working directory override.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Creates a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command from `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Output of a captured command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external programs.
///
/// `Err` means the program could not be started; otherwise the exit code is
/// returned (`None` when the child was terminated by a signal).
pub trait CommandExecutor {
    /// Runs with stdin/stdout/stderr inherited and waits for the child to exit.
    fn run(&self, command: &CommandSpec) -> io::Result<Option<i32>>;

    /// Runs with stdout/stderr captured instead of streamed.
    fn capture(&self, command: &CommandSpec) -> io::Result<CommandOutput>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn run(&self, command: &CommandSpec) -> io::Result<Option<i32>> {
        (**self).run(command)
    }

    fn capture(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        (**self).capture(command)
    }
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl CommandExecutor for SystemExecutor {
    fn run(&self, command: &CommandSpec) -> io::Result<Option<i32>> {
        let status = Self::command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.code())
    }

    fn capture(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        let output = Self::command(command).stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Runs commands on behalf of a named action and types their failures.
///
/// Never retries and never times out: a long `docker compose up` runs until it
/// exits or the user interrupts it.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner<E> {
    executor: E,
}

impl<E: CommandExecutor> ProcessRunner<E> {
    /// Wraps an executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Streams the command and fails unless it exits zero.
    pub fn run(&self, action: &str, command: &CommandSpec) -> Result<(), ToolError> {
        match self.status(action, command)? {
            Some(0) => Ok(()),
            code => Err(ToolError::Failed {
                action: action.to_string(),
                command: command.to_string(),
                code,
            }),
        }
    }

    /// Streams the command and returns its exit code; only a spawn failure is an error.
    pub fn status(&self, action: &str, command: &CommandSpec) -> Result<Option<i32>, ToolError> {
        debug!("Running `{command}` to {action}");
        let code = self
            .executor
            .run(command)
            .map_err(|source| spawn_error(action, command, source))?;
        debug!("`{command}` exited with {code:?}");
        Ok(code)
    }

    /// Captures the command's output; only a spawn failure is an error.
    pub fn capture(&self, action: &str, command: &CommandSpec) -> Result<CommandOutput, ToolError> {
        debug!("Capturing `{command}` to {action}");
        self.executor
            .capture(command)
            .map_err(|source| spawn_error(action, command, source))
    }
}

fn spawn_error(action: &str, command: &CommandSpec, source: io::Error) -> ToolError {
    ToolError::Spawn {
        action: action.to_string(),
        command: command.to_string(),
        source,
    }
}
