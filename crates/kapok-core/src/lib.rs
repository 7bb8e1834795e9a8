//! Kapok Core - Core types for the Kapok deployment tool
//!
//! This crate provides the foundational types used throughout Kapok:
//! - `Provider`: The target cloud, inferred from a kube context or set explicitly
//! - `ProviderDefaults`: Storage and ingress classes for each cloud
//! - `Service`: The fixed catalog of platform services
//! - `DeployOptions`: User-facing options, loadable from YAML
//! - `DeploymentConfig`: The frozen configuration handed to every renderer

pub mod config;
pub mod error;
pub mod options;
pub mod provider;
pub mod service;

pub use config::{DeploymentConfig, UMBRELLA_CHART_NAME};
pub use error::{CoreError, Result};
pub use options::DeployOptions;
pub use provider::{Provider, ProviderDefaults, classify};
pub use service::{Service, ServiceDescriptor};
