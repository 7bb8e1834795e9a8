//! External command execution boundary

use std::process::Command;
use thiserror::Error;

/// Failure of an external command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
        /// Combined stdout and stderr
        output: String,
    },
}

/// Runs an external program and captures its output
pub trait CommandRunner {
    /// Run `program` with `args`, returning combined stdout and stderr on success
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError>;
}

/// Format a command line for logs and error messages
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        let command = display_command(program, args);
        tracing::debug!(%command, "running external command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Launch {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let combined = format!("{}{}", stdout, stderr);

        if !output.status.success() {
            return Err(CommandError::Failed {
                command,
                status: output.status.to_string(),
                stderr: if stderr.is_empty() {
                    "no error output".to_string()
                } else {
                    stderr
                },
                output: combined,
            });
        }

        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let args = vec!["upgrade".to_string(), "--install".to_string()];
        assert_eq!(display_command("helm", &args), "helm upgrade --install");
    }

    #[test]
    fn test_launch_failure() {
        let err = SystemRunner
            .run("kapok-definitely-not-a-real-binary", &[])
            .unwrap_err();
        assert!(matches!(err, CommandError::Launch { .. }));
        assert!(err.to_string().contains("kapok-definitely-not-a-real-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_output() {
        let args = vec!["-c".to_string(), "echo out; echo err >&2".to_string()];
        let output = SystemRunner.run("sh", &args).unwrap();
        assert!(output.contains("out"));
        assert!(output.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_stderr() {
        let args = vec!["-c".to_string(), "echo 'release failed' >&2; exit 3".to_string()];
        let err = SystemRunner.run("sh", &args).unwrap_err();

        match &err {
            CommandError::Failed { stderr, .. } => assert_eq!(stderr, "release failed"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("release failed"));
    }
}
