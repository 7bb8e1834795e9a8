//! Cloud provider detection and per-provider defaults
//!
//! A kube context name usually carries enough information to tell which
//! managed Kubernetes offering it points at: EKS contexts are ARNs, GKE
//! contexts are prefixed with `gke_`, AKS API servers live under
//! `azmk8s.io`. Anything else falls back to [`Provider::Generic`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Marker present in every EKS context created by `aws eks update-kubeconfig`
const AWS_ARN_MARKER: &str = "arn:aws";

/// Prefixes used by `gcloud container clusters get-credentials`
const GKE_MARKERS: [&str; 2] = ["gke_", "gke-"];

/// DNS suffix of AKS API servers
const AKS_DOMAIN_SUFFIX: &str = ".azmk8s.io";

/// A provider token bounded by start/end of string or a non-letter on both sides
fn token_pattern(token: &str) -> Regex {
    Regex::new(&format!("(?i)(^|[^a-z]){token}([^a-z]|$)")).expect("token pattern is valid")
}

static EKS_TOKEN: Lazy<Regex> = Lazy::new(|| token_pattern("eks"));
static AKS_TOKEN: Lazy<Regex> = Lazy::new(|| token_pattern("aks"));

/// Target cloud provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    #[default]
    Generic,
}

impl Provider {
    /// Every provider, in classification precedence order
    pub const ALL: [Provider; 4] = [
        Provider::Aws,
        Provider::Gcp,
        Provider::Azure,
        Provider::Generic,
    ];

    /// Lowercase identifier used in values files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gcp => "gcp",
            Self::Azure => "azure",
            Self::Generic => "generic",
        }
    }

    /// Platform defaults for this provider
    pub fn defaults(&self) -> ProviderDefaults {
        let (storage_class, ingress_class) = match self {
            Self::Aws => ("gp3", "alb"),
            Self::Gcp => ("standard-rwo", "gce"),
            Self::Azure => ("managed-premium", "azure-application-gateway"),
            Self::Generic => ("standard", "nginx"),
        };

        ProviderDefaults {
            provider: *self,
            storage_class,
            ingress_class,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidProvider {
                value: s.to_string(),
            })
    }
}

/// Storage and ingress classes native to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDefaults {
    pub provider: Provider,
    pub storage_class: &'static str,
    pub ingress_class: &'static str,
}

/// Classify a kube context identifier
///
/// Rules are evaluated in order and the first match wins:
/// 1. an AWS ARN or a bounded `eks` token
/// 2. a `gke_` / `gke-` marker
/// 3. the AKS domain suffix or a bounded `aks` token
///
/// Matching ignores case. An empty identifier is [`Provider::Generic`].
pub fn classify(context: &str) -> Provider {
    let lowered = context.to_ascii_lowercase();

    if lowered.contains(AWS_ARN_MARKER) || EKS_TOKEN.is_match(&lowered) {
        Provider::Aws
    } else if GKE_MARKERS.iter().any(|m| lowered.contains(m)) {
        Provider::Gcp
    } else if lowered.ends_with(AKS_DOMAIN_SUFFIX) || AKS_TOKEN.is_match(&lowered) {
        Provider::Azure
    } else {
        Provider::Generic
    }
}
