//! Deploy command - generate the charts and install them

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use kapok_core::DeployOptions;
use kapok_deploy::runner::display_command;
use kapok_deploy::{DeployOutcome, Deployer, InstallCommand, SystemRunner};
use std::time::Duration;

use crate::error::Result;

pub fn run(options: &DeployOptions, kube_context: Option<&str>) -> Result<()> {
    let context = super::context_source(kube_context);
    let runner = SystemRunner;
    let deployer = Deployer::new(&runner, context.as_ref());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(if options.dry_run {
        "Generating charts...".to_string()
    } else {
        format!(
            "Deploying release {} to namespace {}...",
            options.release_name, options.namespace
        )
    });
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = deployer.deploy(options);
    spinner.finish_and_clear();
    let outcome = result?;

    let config = outcome.config();
    println!(
        "{} Provider: {} (storage class {}, ingress class {})",
        style("→").cyan(),
        style(config.provider).bold(),
        config.storage_class,
        config.ingress_class
    );

    match &outcome {
        DeployOutcome::DryRun { chart_dir, .. } => {
            println!(
                "{} Generated chart in {}",
                style("✓").green().bold(),
                chart_dir.display()
            );
            let install = InstallCommand::new(config, chart_dir, options.effective_timeout());
            println!(
                "{} Dry run, helm not invoked. To install:\n  {}",
                style("→").cyan(),
                display_command(&options.helm_binary, &install.args())
            );
        }

        DeployOutcome::Installed {
            chart_dir,
            cleaned_up,
            output,
            ..
        } => {
            println!(
                "{} Release {} deployed to namespace {}",
                style("✓").green().bold(),
                style(&config.release_name).cyan(),
                config.namespace
            );
            if !output.trim().is_empty() {
                println!("{}", style(output.trim_end()).dim());
            }
            if !cleaned_up {
                println!("{} Chart kept in {}", style("→").cyan(), chart_dir.display());
            }
        }
    }

    Ok(())
}
