//! Test doubles for the command boundary

use std::sync::Mutex;

use crate::runner::{CommandError, CommandRunner, display_command};

/// One recorded call to [`CommandRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Value following `flag` in the argument list
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

enum Scripted {
    Succeed(String),
    Fail(String),
}

/// Records invocations and replays a scripted result
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    result: Scripted,
}

impl RecordingRunner {
    /// Every call succeeds with `output`
    pub fn succeeding(output: impl Into<String>) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            result: Scripted::Succeed(output.into()),
        }
    }

    /// Every call fails with `stderr`
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            result: Scripted::Fail(stderr.into()),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
            });
        }

        match &self.result {
            Scripted::Succeed(output) => Ok(output.clone()),
            Scripted::Fail(stderr) => Err(CommandError::Failed {
                command: display_command(program, args),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
                output: stderr.clone(),
            }),
        }
    }
}
