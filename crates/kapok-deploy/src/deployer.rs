//! Deploy orchestration
//!
//! A deploy runs classify, configure, generate, then either stops (dry run)
//! or installs with helm. Any failing step aborts the rest.

use kapok_core::{DeployOptions, DeploymentConfig, Provider, classify};
use kapok_engine::ChartWriter;
use std::path::PathBuf;

use crate::error::{DeployError, Result};
use crate::install::InstallCommand;
use crate::kubeconfig::ContextSource;
use crate::runner::{CommandRunner, display_command};
use crate::scratch::ScratchDir;

/// Result of a successful deploy
#[derive(Debug, Clone)]
pub enum DeployOutcome {
    /// Chart generated, installer not invoked
    DryRun {
        config: DeploymentConfig,
        /// Umbrella chart root, kept on disk
        chart_dir: PathBuf,
    },

    /// Installer ran successfully
    Installed {
        config: DeploymentConfig,
        /// Umbrella chart root
        chart_dir: PathBuf,
        /// Whether a scratch chart directory was removed after the install
        cleaned_up: bool,
        /// Captured installer output
        output: String,
    },
}

impl DeployOutcome {
    pub fn config(&self) -> &DeploymentConfig {
        match self {
            Self::DryRun { config, .. } | Self::Installed { config, .. } => config,
        }
    }

    pub fn chart_dir(&self) -> &std::path::Path {
        match self {
            Self::DryRun { chart_dir, .. } | Self::Installed { chart_dir, .. } => chart_dir,
        }
    }
}

/// Runs the deploy pipeline against a command runner and a context source
pub struct Deployer<'a> {
    runner: &'a dyn CommandRunner,
    context: &'a dyn ContextSource,
}

impl<'a> Deployer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, context: &'a dyn ContextSource) -> Self {
        Self { runner, context }
    }

    /// Resolve the provider: explicit option first, then the ambient context
    pub fn resolve_provider(&self, options: &DeployOptions) -> Provider {
        if let Some(provider) = options.provider {
            tracing::info!(%provider, "using explicit provider");
            return provider;
        }

        let context = self.context.current_context().unwrap_or_default();
        let provider = classify(&context);
        tracing::info!(%context, %provider, "detected provider from kube context");
        provider
    }

    /// Run the whole pipeline
    pub fn deploy(&self, options: &DeployOptions) -> Result<DeployOutcome> {
        let detected = self.resolve_provider(options);
        let config = DeploymentConfig::build(options, detected);
        tracing::info!(
            release = %config.release_name,
            namespace = %config.namespace,
            provider = %config.provider,
            storage_class = %config.storage_class,
            ingress_class = %config.ingress_class,
            "deployment configured"
        );

        let scratch = match &options.output_dir {
            Some(dir) => ScratchDir::borrowed(dir),
            None => ScratchDir::create().map_err(DeployError::Scratch)?,
        };

        self.deploy_into(options, config, scratch)
    }

    /// Generate into `scratch`, then install unless this is a dry run
    pub(crate) fn deploy_into(
        &self,
        options: &DeployOptions,
        config: DeploymentConfig,
        mut scratch: ScratchDir,
    ) -> Result<DeployOutcome> {
        let summary = ChartWriter::new()?.write(scratch.path(), &config)?;

        if options.dry_run {
            tracing::info!(chart = %summary.root.display(), "dry run, skipping install");
            return Ok(DeployOutcome::DryRun {
                config,
                chart_dir: summary.root,
            });
        }

        // From here on an owned scratch directory goes away, whatever helm says
        scratch.arm();

        let install = InstallCommand::new(&config, &summary.root, options.effective_timeout());
        let args = install.args();
        tracing::info!(
            command = %display_command(&options.helm_binary, &args),
            "installing release"
        );

        let result = self.runner.run(&options.helm_binary, &args);
        let cleaned_up = scratch.cleanup();

        let output = result.map_err(|source| DeployError::Install {
            release: install.release.clone(),
            namespace: install.namespace.clone(),
            chart: summary.root.clone(),
            source,
        })?;

        tracing::info!(release = %config.release_name, "release installed");

        Ok(DeployOutcome::Installed {
            cleaned_up,
            config,
            chart_dir: summary.root,
            output,
        })
    }
}
