//! Template command - generate the charts without installing them

use console::style;
use kapok_core::{DeployOptions, DeploymentConfig};
use kapok_deploy::{Deployer, SystemRunner};
use kapok_engine::Engine;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::Result;

pub fn run(
    options: &DeployOptions,
    kube_context: Option<&str>,
    output_dir: Option<&Path>,
    stdout: bool,
) -> Result<()> {
    let context = super::context_source(kube_context);
    // Never invoked: template runs are always dry
    let runner = SystemRunner;
    let deployer = Deployer::new(&runner, context.as_ref());

    if stdout {
        let config = DeploymentConfig::build(options, deployer.resolve_provider(options));
        let engine = Engine::new()?;

        for file in engine.render_catalog(&config)? {
            println!("---");
            println!("# Source: {}", Path::new("kapok").join(&file.path).display());
            print!("{}", file.content);
        }
        return Ok(());
    }

    let options = DeployOptions {
        output_dir: output_dir.map(Path::to_path_buf),
        dry_run: true,
        ..options.clone()
    };
    let outcome = deployer.deploy(&options)?;
    let chart_dir = outcome.chart_dir();

    println!(
        "{} Generated {} chart in {}",
        style("✓").green().bold(),
        style(outcome.config().provider).bold(),
        chart_dir.display()
    );

    for entry in WalkDir::new(chart_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(chart_dir).unwrap_or(entry.path());
            println!("  {}", relative.display());
        }
    }

    Ok(())
}
