//! CLI error types with exit code handling
//!
//! Library errors from every kapok crate funnel into [`CliError`], which
//! knows the process exit code each failure maps to.

use kapok_core::CoreError;
use kapok_deploy::DeployError;
use kapok_engine::EngineError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Options file or flag values are unusable
    #[error("Configuration error: {message}")]
    #[diagnostic(code(kapok::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart rendering failed
    #[error("Template error: {message}")]
    #[diagnostic(
        code(kapok::cli::template),
        help("this is a defect in the built-in chart templates, please report it")
    )]
    Template { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kapok::cli::io))]
    Io { message: String },

    /// The installer failed
    #[error("{message}")]
    #[diagnostic(code(kapok::cli::install))]
    Install {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(kapok::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::ERROR,
            CliError::Template { .. } => exit_codes::TEMPLATE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Install { .. } => exit_codes::INSTALL_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => e.into(),
            other => CliError::Config {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            // Keep the source snippet and span in the message
            EngineError::Template(e) => CliError::Template {
                message: format!("{:?}", miette::Report::new(e)),
            },
            EngineError::Syntax(message) => CliError::Template { message },
            fs @ (EngineError::CreateDir { .. } | EngineError::Write { .. }) => CliError::Io {
                message: fs.to_string(),
            },
        }
    }
}

impl From<DeployError> for CliError {
    fn from(err: DeployError) -> Self {
        match err {
            DeployError::Generate(e) => e.into(),
            DeployError::Scratch(e) => CliError::Io {
                message: format!("failed to create scratch directory: {e}"),
            },
            install @ DeployError::Install { .. } => CliError::Install {
                message: install.to_string(),
                help: Some(
                    "rerun with --output-dir <dir> to keep the generated chart for inspection"
                        .to_string(),
                ),
            },
            other => CliError::Other {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kapok_deploy::CommandError;
    use std::path::PathBuf;

    #[test]
    fn test_install_failure_exit_code() {
        let err: CliError = DeployError::Install {
            release: "kapok".to_string(),
            namespace: "prod".to_string(),
            chart: PathBuf::from("/tmp/kapok-x/kapok"),
            source: CommandError::Failed {
                command: "helm upgrade --install".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "boom".to_string(),
                output: "boom".to_string(),
            },
        }
        .into();

        assert_eq!(err.exit_code(), exit_codes::INSTALL_ERROR);
        assert!(err.to_string().contains("helm upgrade --install failed"));
    }

    #[test]
    fn test_write_failure_is_io() {
        let err: CliError = DeployError::Generate(EngineError::Write {
            path: PathBuf::from("/ro/kapok/values.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
        .into();

        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
        assert!(err.to_string().contains("/ro/kapok/values.yaml"));
    }

    #[test]
    fn test_invalid_provider_is_config_error() {
        let err: CliError = "openstack".parse::<kapok_core::Provider>().unwrap_err().into();
        assert_eq!(err.exit_code(), exit_codes::ERROR);
        assert!(err.to_string().contains("openstack"));
    }
}
