//! Kapok Deploy - drives a generated chart into a cluster
//!
//! This crate provides:
//! - **Command boundary**: `CommandRunner` abstracts the external installer process
//! - **Context detection**: reads the active kube context to infer the cloud
//! - **Scratch directories**: chart workspaces removed only when Kapok created them
//! - **Orchestration**: classify, configure, generate, install, clean up

pub mod deployer;
pub mod error;
pub mod install;
pub mod kubeconfig;
pub mod runner;
pub mod scratch;
pub mod testing;

pub use deployer::{DeployOutcome, Deployer};
pub use error::{DeployError, Result};
pub use install::InstallCommand;
pub use kubeconfig::{ContextSource, Kubeconfig, StaticContext};
pub use runner::{CommandError, CommandRunner, SystemRunner};
pub use scratch::ScratchDir;
