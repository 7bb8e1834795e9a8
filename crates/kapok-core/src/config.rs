//! Frozen deployment configuration

use serde::Serialize;

use crate::options::DeployOptions;
use crate::provider::Provider;

/// Name of the umbrella chart and its root directory
pub const UMBRELLA_CHART_NAME: &str = "kapok";

/// The single source of truth handed to every renderer
///
/// Built once from [`DeployOptions`] and never mutated afterwards. Storage
/// and ingress classes are always non-empty once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub release_name: String,
    pub namespace: String,
    pub provider: Provider,
    pub domain: String,
    pub tls_enabled: bool,
    pub hpa_enabled: bool,
    pub keda_enabled: bool,
    pub image_tag: String,
    pub storage_class: String,
    pub ingress_class: String,
    pub acme_email: String,
}

impl DeploymentConfig {
    /// Merge options with a detected provider and that provider's defaults
    ///
    /// An explicit `options.provider` overrides `detected`.
    pub fn build(options: &DeployOptions, detected: Provider) -> Self {
        let provider = options.provider.unwrap_or(detected);
        let defaults = provider.defaults();

        Self {
            release_name: options.release_name.clone(),
            namespace: options.namespace.clone(),
            provider,
            domain: options.domain.clone(),
            tls_enabled: options.tls_enabled,
            hpa_enabled: options.hpa_enabled,
            keda_enabled: options.keda_enabled,
            image_tag: options.image_tag.clone(),
            storage_class: non_empty_or(options.storage_class.as_deref(), defaults.storage_class),
            ingress_class: non_empty_or(options.ingress_class.as_deref(), defaults.ingress_class),
            acme_email: non_empty_or(
                options.acme_email.as_deref(),
                &format!("admin@{}", options.domain),
            ),
        }
    }

    /// ClusterIssuer name used when TLS is enabled
    pub fn issuer_name(&self) -> String {
        format!("{}-letsencrypt", self.release_name)
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
