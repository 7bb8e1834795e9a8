//! Kapok CLI - generates the Kapok Helm charts and installs them into a cluster

use clap::{Args, Parser, Subcommand};
use kapok_core::{DeployOptions, Provider};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod error;
mod exit_codes;

use error::{CliError, Result};

#[derive(Parser)]
#[command(name = "kapok")]
#[command(author = "Kapok Contributors")]
#[command(version)]
#[command(about = "Cloud-aware Helm chart generator and installer for Kapok", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the charts and install them with helm
    Deploy {
        #[command(flatten)]
        chart: ChartArgs,

        /// Write the chart here and keep it (a scratch directory is used otherwise)
        #[arg(short, long, env = "KAPOK_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Generate the chart without installing it
        #[arg(long, env = "KAPOK_DRY_RUN")]
        dry_run: bool,

        /// Time to wait for the release to become ready (helm duration)
        #[arg(long, env = "KAPOK_TIMEOUT")]
        timeout: Option<String>,

        /// Helm executable
        #[arg(long, env = "KAPOK_HELM")]
        helm: Option<String>,
    },

    /// Generate the charts without installing them
    Template {
        #[command(flatten)]
        chart: ChartArgs,

        /// Directory to write the chart into
        #[arg(short, long, env = "KAPOK_OUTPUT_DIR", required_unless_present = "stdout")]
        output_dir: Option<PathBuf>,

        /// Print the rendered files instead of writing them
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,
    },

    /// Show which cloud provider a kube context belongs to
    Detect {
        /// Context name (default: current-context from kubeconfig)
        context: Option<String>,
    },

    /// List supported providers and their defaults
    Providers,
}

/// Flags shared by every command that renders charts
#[derive(Args)]
struct ChartArgs {
    /// Options file (default: ~/.config/kapok/config.yaml)
    #[arg(short, long, env = "KAPOK_CONFIG")]
    config: Option<PathBuf>,

    /// Kube context used for provider detection (default: current-context)
    #[arg(long, env = "KAPOK_KUBE_CONTEXT")]
    kube_context: Option<String>,

    /// Helm release name
    #[arg(long, env = "KAPOK_RELEASE")]
    release: Option<String>,

    /// Cloud provider (aws, gcp, azure, generic); detected when omitted
    #[arg(short, long, env = "KAPOK_PROVIDER")]
    provider: Option<Provider>,

    /// Target namespace
    #[arg(short, long, env = "KAPOK_NAMESPACE")]
    namespace: Option<String>,

    /// Public domain
    #[arg(short, long, env = "KAPOK_DOMAIN")]
    domain: Option<String>,

    /// Image tag for all services
    #[arg(long, env = "KAPOK_IMAGE_TAG")]
    image_tag: Option<String>,

    /// Storage class (default: provider's)
    #[arg(long, env = "KAPOK_STORAGE_CLASS")]
    storage_class: Option<String>,

    /// Ingress class (default: provider's)
    #[arg(long, env = "KAPOK_INGRESS_CLASS")]
    ingress_class: Option<String>,

    /// ACME contact email (default: admin@<domain>)
    #[arg(long, env = "KAPOK_ACME_EMAIL")]
    acme_email: Option<String>,

    /// Issue TLS certificates with cert-manager
    #[arg(long, env = "KAPOK_TLS")]
    tls: bool,

    /// Enable HorizontalPodAutoscalers
    #[arg(long, env = "KAPOK_HPA")]
    hpa: bool,

    /// Enable KEDA ScaledObjects
    #[arg(long, env = "KAPOK_KEDA")]
    keda: bool,
}

impl ChartArgs {
    /// Options file values overridden by flags
    fn options(&self) -> Result<DeployOptions> {
        let mut options = match &self.config {
            Some(path) => DeployOptions::load_from(path).map_err(|e| {
                CliError::config_with_help(
                    e.to_string(),
                    format!("check {} or omit --config", path.display()),
                )
            })?,
            None => DeployOptions::load()?,
        };

        if let Some(release) = &self.release {
            options.release_name = release.clone();
        }
        if self.provider.is_some() {
            options.provider = self.provider;
        }
        if let Some(namespace) = &self.namespace {
            options.namespace = namespace.clone();
        }
        if let Some(domain) = &self.domain {
            options.domain = domain.clone();
        }
        if let Some(tag) = &self.image_tag {
            options.image_tag = tag.clone();
        }
        if self.storage_class.is_some() {
            options.storage_class = self.storage_class.clone();
        }
        if self.ingress_class.is_some() {
            options.ingress_class = self.ingress_class.clone();
        }
        if self.acme_email.is_some() {
            options.acme_email = self.acme_email.clone();
        }

        // Flags only switch features on; the file may already have
        options.tls_enabled |= self.tls;
        options.hpa_enabled |= self.hpa;
        options.keda_enabled |= self.keda;

        Ok(options)
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(exit_codes::USAGE_ERROR);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }

    std::process::exit(exit_codes::SUCCESS);
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Deploy {
            chart,
            output_dir,
            dry_run,
            timeout,
            helm,
        } => {
            let mut options = chart.options()?;
            if output_dir.is_some() {
                options.output_dir = output_dir;
            }
            options.dry_run |= dry_run;
            if let Some(timeout) = timeout {
                options.timeout = timeout;
            }
            if let Some(helm) = helm {
                options.helm_binary = helm;
            }
            commands::deploy::run(&options, chart.kube_context.as_deref())
        }

        Commands::Template {
            chart,
            output_dir,
            stdout,
        } => {
            let options = chart.options()?;
            commands::template::run(
                &options,
                chart.kube_context.as_deref(),
                output_dir.as_deref(),
                stdout,
            )
        }

        Commands::Detect { context } => commands::detect::run(context.as_deref()),

        Commands::Providers => commands::providers::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_provider_flag_parses_case_insensitively() {
        let cli =
            Cli::try_parse_from(["kapok", "template", "--stdout", "--provider", "GCP"]).unwrap();
        match cli.command {
            Commands::Template { chart, .. } => assert_eq!(chart.provider, Some(Provider::Gcp)),
            _ => panic!("expected template"),
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["kapok", "template", "--stdout", "-p", "openstack"]).is_err());
    }

    #[test]
    fn test_template_requires_a_destination() {
        assert!(Cli::try_parse_from(["kapok", "template"]).is_err());
    }

    #[test]
    fn test_flags_override_options_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "namespace: from-file\ndomain: file.example\ntlsEnabled: true\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "kapok",
            "template",
            "--stdout",
            "--config",
            path.to_str().unwrap(),
            "--namespace",
            "from-flag",
        ])
        .unwrap();

        let Commands::Template { chart, .. } = cli.command else {
            panic!("expected template");
        };
        let options = chart.options().unwrap();
        assert_eq!(options.namespace, "from-flag");
        assert_eq!(options.domain, "file.example");
        assert!(options.tls_enabled);
    }
}
