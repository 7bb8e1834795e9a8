//! Ambient kube context lookup
//!
//! Only `current-context` is read; cluster credentials are left to the installer.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Source of the kube context name used for provider detection
pub trait ContextSource {
    /// The active context, if one can be determined
    fn current_context(&self) -> Option<String>;
}

/// A fixed context name, e.g. from `--kube-context`
#[derive(Debug, Clone)]
pub struct StaticContext(pub String);

impl ContextSource for StaticContext {
    fn current_context(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct KubeconfigFile {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
}

/// Reads `current-context` from kubeconfig files
#[derive(Debug, Clone)]
pub struct Kubeconfig {
    paths: Vec<PathBuf>,
}

impl Kubeconfig {
    /// Use `$KUBECONFIG`, falling back to `~/.kube/config`
    pub fn from_env() -> Self {
        let paths = match std::env::var_os("KUBECONFIG") {
            Some(value) if !value.is_empty() => std::env::split_paths(&value).collect(),
            _ => dirs::home_dir()
                .map(|home| vec![home.join(".kube").join("config")])
                .unwrap_or_default(),
        };
        Self { paths }
    }

    /// Use a single explicit kubeconfig file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    fn read_context(path: &Path) -> Option<String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "kubeconfig not readable");
                return None;
            }
        };

        match serde_yaml::from_str::<KubeconfigFile>(&content) {
            Ok(file) => file.current_context.filter(|c| !c.is_empty()),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "kubeconfig not parseable");
                None
            }
        }
    }
}

impl ContextSource for Kubeconfig {
    fn current_context(&self) -> Option<String> {
        // First file that sets current-context wins, as with kubectl
        self.paths.iter().find_map(|p| Self::read_context(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_current_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(
            &path,
            r#"apiVersion: v1
kind: Config
clusters: []
contexts:
  - name: gke_proj_us-central1_prod
    context:
      cluster: prod
      user: admin
current-context: gke_proj_us-central1_prod
"#,
        )
        .unwrap();

        assert_eq!(
            Kubeconfig::at(&path).current_context().as_deref(),
            Some("gke_proj_us-central1_prod")
        );
    }

    #[test]
    fn test_missing_file_has_no_context() {
        assert!(Kubeconfig::at("/nonexistent/kubeconfig").current_context().is_none());
    }

    #[test]
    fn test_first_file_with_context_wins() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty");
        let second = dir.path().join("second");
        std::fs::write(&empty, "apiVersion: v1\nkind: Config\n").unwrap();
        std::fs::write(&second, "current-context: aks-prod\n").unwrap();

        let kubeconfig = Kubeconfig {
            paths: vec![dir.path().join("missing"), empty, second],
        };
        assert_eq!(kubeconfig.current_context().as_deref(), Some("aks-prod"));
    }

    #[test]
    fn test_static_context() {
        let source = StaticContext("kind-kind".to_string());
        assert_eq!(source.current_context().as_deref(), Some("kind-kind"));
    }
}
