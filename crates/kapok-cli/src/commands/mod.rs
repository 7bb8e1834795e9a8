//! CLI commands

pub mod deploy;
pub mod detect;
pub mod providers;
pub mod template;

use kapok_deploy::{ContextSource, Kubeconfig, StaticContext};

/// Context used for provider detection: `--kube-context` or kubeconfig
pub fn context_source(kube_context: Option<&str>) -> Box<dyn ContextSource> {
    match kube_context {
        Some(context) => Box::new(StaticContext(context.to_string())),
        None => Box::new(Kubeconfig::from_env()),
    }
}
