//! Helm install invocation

use kapok_core::DeploymentConfig;
use std::path::{Path, PathBuf};

/// Arguments of a `helm upgrade --install` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    /// Release name
    pub release: String,

    /// Target namespace
    pub namespace: String,

    /// Path to the umbrella chart
    pub chart: PathBuf,

    /// Create the namespace if it doesn't exist
    pub create_namespace: bool,

    /// Wait for resources to be ready
    pub wait: bool,

    /// Duration string understood by `helm --timeout`
    pub timeout: String,
}

impl InstallCommand {
    /// Install `chart` as configured, waiting up to `timeout`
    pub fn new(config: &DeploymentConfig, chart: &Path, timeout: &str) -> Self {
        Self {
            release: config.release_name.clone(),
            namespace: config.namespace.clone(),
            chart: chart.to_path_buf(),
            create_namespace: true,
            wait: true,
            timeout: timeout.to_string(),
        }
    }

    /// Argument vector passed to the helm binary
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "upgrade".to_string(),
            "--install".to_string(),
            self.release.clone(),
            self.chart.display().to_string(),
            "--namespace".to_string(),
            self.namespace.clone(),
        ];

        if self.create_namespace {
            args.push("--create-namespace".to_string());
        }
        if self.wait {
            args.push("--wait".to_string());
        }
        args.push("--timeout".to_string());
        args.push(self.timeout.clone());

        args
    }
}
