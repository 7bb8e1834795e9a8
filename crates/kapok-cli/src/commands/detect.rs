//! Detect command - classify a kube context

use console::style;
use kapok_core::classify;
use kapok_deploy::{ContextSource, Kubeconfig};

use crate::error::Result;

pub fn run(context: Option<&str>) -> Result<()> {
    let context = match context {
        Some(context) => Some(context.to_string()),
        None => Kubeconfig::from_env().current_context(),
    };

    match &context {
        Some(name) => println!("{} Context: {}", style("→").cyan(), name),
        None => println!(
            "{} No current kube context, falling back to generic",
            style("→").yellow()
        ),
    }

    let provider = classify(context.as_deref().unwrap_or_default());
    let defaults = provider.defaults();

    println!("{} Provider: {}", style("✓").green().bold(), style(provider).bold());
    println!("  Storage class: {}", defaults.storage_class);
    println!("  Ingress class: {}", defaults.ingress_class);

    Ok(())
}
