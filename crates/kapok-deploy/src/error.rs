//! Error types for kapok-deploy

use kapok_engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

use crate::runner::CommandError;

/// Result type for kapok-deploy operations
pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors that abort a deployment
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeployError {
    /// Scratch directory could not be created
    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    /// Chart generation failed
    #[error("chart generation failed: {0}")]
    Generate(#[from] EngineError),

    /// The installer reported failure
    #[error(
        "helm upgrade --install failed for release '{release}' in namespace '{namespace}' (chart {}): {source}",
        chart.display()
    )]
    Install {
        release: String,
        namespace: String,
        chart: PathBuf,
        #[source]
        source: CommandError,
    },
}
