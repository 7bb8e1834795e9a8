//! User-facing deployment options
//!
//! Options are read from `~/.config/kapok/config.yaml` when present and then
//! overridden field by field from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::provider::Provider;

pub const DEFAULT_RELEASE_NAME: &str = "kapok";
pub const DEFAULT_NAMESPACE: &str = "kapok";
pub const DEFAULT_DOMAIN: &str = "kapok.local";
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const DEFAULT_TIMEOUT: &str = "10m";
pub const DEFAULT_HELM_BINARY: &str = "helm";

/// Flat options record consumed by the deploy pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeployOptions {
    /// Helm release name
    pub release_name: String,

    /// Explicit provider; skips context detection when set
    pub provider: Option<Provider>,

    /// Target namespace
    pub namespace: String,

    /// Public domain served by the ingresses
    pub domain: String,

    /// Issue certificates through cert-manager
    pub tls_enabled: bool,

    /// Emit HorizontalPodAutoscalers for every service
    pub hpa_enabled: bool,

    /// Emit KEDA ScaledObjects
    pub keda_enabled: bool,

    /// Image tag shared by all services
    pub image_tag: String,

    /// Storage class override (provider default when unset)
    pub storage_class: Option<String>,

    /// Ingress class override (provider default when unset)
    pub ingress_class: Option<String>,

    /// Contact address for the ACME issuer (`admin@<domain>` when unset)
    pub acme_email: Option<String>,

    /// Where to write the chart; a scratch directory is used when unset
    pub output_dir: Option<PathBuf>,

    /// Generate the chart without installing it
    pub dry_run: bool,

    /// Duration string passed to `helm --timeout`
    pub timeout: String,

    /// Helm executable to invoke
    pub helm_binary: String,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            release_name: DEFAULT_RELEASE_NAME.to_string(),
            provider: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            tls_enabled: false,
            hpa_enabled: false,
            keda_enabled: false,
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            storage_class: None,
            ingress_class: None,
            acme_email: None,
            output_dir: None,
            dry_run: false,
            timeout: DEFAULT_TIMEOUT.to_string(),
            helm_binary: DEFAULT_HELM_BINARY.to_string(),
        }
    }
}

impl DeployOptions {
    /// Load options from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load options from a specific YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|source| CoreError::YamlParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Get default options file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| CoreError::InvalidConfig {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("kapok").join("config.yaml"))
    }

    /// Effective helm timeout; blank values fall back to the default
    pub fn effective_timeout(&self) -> &str {
        let trimmed = self.timeout.trim();
        if trimmed.is_empty() {
            DEFAULT_TIMEOUT
        } else {
            trimmed
        }
    }
}
