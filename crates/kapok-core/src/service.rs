//! The fixed catalog of platform services
//!
//! Every per-service manifest is emitted once for each entry of [`Service::ALL`].

use serde::{Deserialize, Serialize};

/// A Kapok platform service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Control-plane REST API
    Api,
    /// Web console serving the dashboards
    Console,
    /// Query gateway in front of tenant databases
    Gateway,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Api, Service::Console, Service::Gateway];

    /// Subchart and workload name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Api => "kapok-api",
            Self::Console => "kapok-console",
            Self::Gateway => "kapok-gateway",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Api => "Kapok control-plane API",
            Self::Console => "Kapok web console",
            Self::Gateway => "Kapok query gateway",
        }
    }

    /// Path prefix routed to this service by the ingress
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Self::Api => "/api",
            Self::Console => "/",
            Self::Gateway => "/gateway",
        }
    }

    /// Container port the service listens on
    pub fn port(&self) -> u16 {
        match self {
            Self::Api => 8080,
            Self::Console => 3000,
            Self::Gateway => 8000,
        }
    }

    /// Serializable view bound into the per-service templates
    pub fn descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            route_prefix: self.route_prefix().to_string(),
            port: self.port(),
            tls_secret_name: format!("{}-tls", self.name()),
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Template-facing description of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub name: String,
    pub description: String,
    pub route_prefix: String,
    pub port: u16,
    /// Secret cert-manager stores this service's certificate in
    pub tls_secret_name: String,
}
