//! The fixed catalog of chart templates
//!
//! Each entry names where its output lands, whether it is rendered once for
//! the umbrella chart or once per service, and which feature flag gates it.

use kapok_core::DeploymentConfig;

/// How often a template is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Once, relative to the umbrella chart root
    Umbrella,
    /// Once per service, relative to `charts/<service>`
    PerService,
}

/// Feature flag gating a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Tls,
    Keda,
    Hpa,
}

impl Condition {
    /// Whether a template with this condition is emitted for `config`
    pub fn holds(&self, config: &DeploymentConfig) -> bool {
        match self {
            Self::Always => true,
            Self::Tls => config.tls_enabled,
            Self::Keda => config.keda_enabled,
            Self::Hpa => config.hpa_enabled,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    /// Unique template name inside the engine
    pub name: &'static str,
    /// Output path relative to the scope root
    pub path: &'static str,
    pub scope: Scope,
    pub condition: Condition,
    pub source: &'static str,
}

macro_rules! template {
    ($scope:ident, $condition:ident, $dir:literal, $file:literal, $path:literal) => {
        TemplateSpec {
            name: concat!($dir, "/", $file),
            path: $path,
            scope: Scope::$scope,
            condition: Condition::$condition,
            source: include_str!(concat!("../templates/", $dir, "/", $file)),
        }
    };
}

pub static CATALOG: &[TemplateSpec] = &[
    template!(Umbrella, Always, "umbrella", "Chart.yaml", "Chart.yaml"),
    template!(Umbrella, Always, "umbrella", "values.yaml", "values.yaml"),
    template!(Umbrella, Always, "umbrella", "namespace.yaml", "templates/namespace.yaml"),
    template!(Umbrella, Always, "umbrella", "secrets.yaml", "templates/secrets.yaml"),
    template!(Umbrella, Tls, "umbrella", "cert-manager.yaml", "templates/cert-manager.yaml"),
    template!(Umbrella, Tls, "umbrella", "cluster-issuer.yaml", "templates/cluster-issuer.yaml"),
    template!(
        Umbrella,
        Keda,
        "umbrella",
        "keda-scaled-object.yaml",
        "templates/keda-scaled-object.yaml"
    ),
    template!(PerService, Always, "service", "Chart.yaml", "Chart.yaml"),
    template!(PerService, Always, "service", "deployment.yaml", "templates/deployment.yaml"),
    template!(PerService, Always, "service", "service.yaml", "templates/service.yaml"),
    template!(PerService, Always, "service", "ingress.yaml", "templates/ingress.yaml"),
    template!(PerService, Always, "service", "configmap.yaml", "templates/configmap.yaml"),
    template!(PerService, Hpa, "service", "hpa.yaml", "templates/hpa.yaml"),
];

/// Catalog entries of the given scope, in catalog order
pub fn entries(scope: Scope) -> impl Iterator<Item = &'static TemplateSpec> {
    CATALOG.iter().filter(move |spec| spec.scope == scope)
}
