use std::{cell::RefCell, io};

use crate::process::{CommandExecutor, CommandOutput, CommandSpec};

#[derive(Clone)]
enum Outcome {
    Exit(Option<i32>),
    SpawnFailure,
    Output(CommandOutput),
}

struct Rule {
    program: String,
    args_prefix: Vec<String>,
    outcome: Outcome,
}

/// Executor that records every invocation and answers from scripted rules.
///
/// Unmatched commands exit zero with empty output. Later rules win.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: RefCell<Vec<CommandSpec>>,
    rules: RefCell<Vec<Rule>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn exit_with(&self, program: &str, code: i32) {
        self.push(program, &[], Outcome::Exit(Some(code)));
    }

    pub fn exit_with_args(&self, program: &str, args_prefix: &[&str], code: i32) {
        self.push(program, args_prefix, Outcome::Exit(Some(code)));
    }

    pub fn fail_to_spawn(&self, program: &str) {
        self.push(program, &[], Outcome::SpawnFailure);
    }

    pub fn respond(&self, program: &str, args_prefix: &[&str], code: i32, stdout: &str) {
        self.push(
            program,
            args_prefix,
            Outcome::Output(CommandOutput {
                code: Some(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            }),
        );
    }

    fn push(&self, program: &str, args_prefix: &[&str], outcome: Outcome) {
        self.rules.borrow_mut().push(Rule {
            program: program.to_string(),
            args_prefix: args_prefix.iter().map(|arg| arg.to_string()).collect(),
            outcome,
        });
    }

    fn outcome_for(&self, command: &CommandSpec) -> Option<Outcome> {
        self.calls.borrow_mut().push(command.clone());
        self.rules
            .borrow()
            .iter()
            .rev()
            .find(|rule| {
                rule.program == command.program
                    && command.args.starts_with(&rule.args_prefix)
            })
            .map(|rule| rule.outcome.clone())
    }
}

fn spawn_failure(command: &CommandSpec) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found", command.program),
    )
}

impl CommandExecutor for RecordingExecutor {
    fn run(&self, command: &CommandSpec) -> io::Result<Option<i32>> {
        match self.outcome_for(command) {
            None => Ok(Some(0)),
            Some(Outcome::Exit(code)) => Ok(code),
            Some(Outcome::Output(output)) => Ok(output.code),
            Some(Outcome::SpawnFailure) => Err(spawn_failure(command)),
        }
    }

    fn capture(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        match self.outcome_for(command) {
            None => Ok(CommandOutput {
                code: Some(0),
                ..CommandOutput::default()
            }),
            Some(Outcome::Exit(code)) => Ok(CommandOutput {
                code,
                ..CommandOutput::default()
            }),
            Some(Outcome::Output(output)) => Ok(output),
            Some(Outcome::SpawnFailure) => Err(spawn_failure(command)),
        }
    }
}
